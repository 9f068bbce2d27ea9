//! Optional `rookery.toml` settings.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rookery_uci::BridgeConfig;
use serde::Deserialize;
use tracing::debug;

/// Looked up in the working directory when no path is given.
pub const DEFAULT_PATH: &str = "rookery.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `[engine]` table.
    pub engine: BridgeConfig,
}

impl Config {
    /// Load settings from `path`, which must exist, or from
    /// [`DEFAULT_PATH`] if present.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = match path {
            Some(path) => path,
            None => {
                let fallback = Path::new(DEFAULT_PATH);
                if !fallback.exists() {
                    debug!("no {DEFAULT_PATH}, using defaults");
                    return Ok(Config::default());
                }
                fallback
            }
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Config::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    fn parse(text: &str) -> Result<Config> {
        Ok(toml::from_str(text)?)
    }
}
