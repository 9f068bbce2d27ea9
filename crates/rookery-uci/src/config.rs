//! Engine bridge settings.

use std::path::PathBuf;

use serde::Deserialize;

/// Where the external engine lives and how deep it searches.
///
/// Deserializes from a TOML table; missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Path of the UCI engine executable.
    pub engine_path: PathBuf,
    /// Depth passed to `go depth`.
    pub depth: u8,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            engine_path: PathBuf::from("/usr/games/stockfish"),
            depth: 13,
        }
    }
}
