use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

mod config;
mod repl;

use crate::config::Config;
use crate::repl::Repl;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load(path.as_deref())?;
    info!(
        engine = %config.engine.engine_path.display(),
        depth = config.engine.depth,
        "rookery starting"
    );

    Repl::new(config.engine).run()
}
