//! Tunables for rail joining, obfuscation and the search generators.
//!
//! Loops that are not provably bounded (join passes, obfuscation rounds, heuristic restarts)
//! read their caps from here. A JSON file passed to the binary with `--config` overrides any
//! subset of the defaults.

use std::fs;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::output::io_error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Caps for [`crate::board::Board::join_until_tour`].
pub struct JoinLimits {
    /// Number of spanning-forest join passes before reporting non-convergence.
    pub max_passes: usize,
}

impl Default for JoinLimits {
    fn default() -> Self {
        Self { max_passes: 64 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Parameters for [`crate::board::Board::obfuscate`].
pub struct ObfuscateConfig {
    /// Shatter passes applied before each join attempt.
    pub shatter_passes: usize,
    /// Shatter-then-join rounds attempted before giving up.
    pub max_rounds: usize,
    pub join: JoinLimits,
}

impl Default for ObfuscateConfig {
    fn default() -> Self {
        Self {
            shatter_passes: 16,
            max_rounds: 8,
            join: JoinLimits::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Restart caps for the heuristic generators.
pub struct SearchLimits {
    /// Whole-board restarts of the Warnsdorff walk.
    pub max_warnsdorff_attempts: u64,
    /// Restarts of the Takefuji-Lee network from fresh random outputs.
    pub max_network_restarts: u64,
    /// Update sweeps per network restart.
    pub network_sweeps: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_warnsdorff_attempts: 100_000,
            max_network_restarts: 10_000,
            network_sweeps: 400,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub join: JoinLimits,
    pub obfuscate: ObfuscateConfig,
    pub search: SearchLimits,
}

impl Config {
    /// Load a JSON config. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Config> {
        let f = fs::File::open(path).map_err(io_error("config_open", path))?;
        serde_json::from_reader(BufReader::new(f)).map_err(io_error("config_parse", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"join":{"max_passes":3}}"#).unwrap();
        assert_eq!(cfg.join.max_passes, 3);
        assert_eq!(cfg.obfuscate, ObfuscateConfig::default());
        assert_eq!(cfg.search.network_sweeps, 400);
    }
}
