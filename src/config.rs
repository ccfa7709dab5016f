//! Runtime configuration
//!
//! Read from an optional JSON file, then overridden by command-line flags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::ArcadeError;

/// Command-line flags
#[derive(Debug, Default, Parser)]
#[command(name = "arcade-hub", version, about = "Terminal arcade: blocks, maze chase and breakout")]
pub struct Cli {
    /// Path to a JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fixed RNG seed (same seed, same mazes and piece order)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Tick interval in milliseconds
    #[arg(long = "tick-rate")]
    pub tick_rate_ms: Option<u64>,

    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long = "log-level")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Event loop tick interval (~60 FPS by default)
    pub tick_rate_ms: u64,
    /// Base seed for every game's RNG. `None` picks one at startup.
    pub seed: Option<u64>,
    /// Falling-block gravity interval
    pub drop_interval_ms: u64,
    pub log_level: String,
    /// Where log output goes. Defaults to a file in the temp directory.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: 16,
            seed: None,
            drop_interval_ms: 1000,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load from `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, ArcadeError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Self::from_json(&json).map_err(|source| ArcadeError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build the effective config: file (if given) then CLI overrides.
    pub fn resolve(cli: &Cli) -> Result<Self, ArcadeError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.tick_rate_ms = config.tick_rate_ms.max(1);
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(ms) = cli.tick_rate_ms {
            self.tick_rate_ms = ms.max(1);
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("arcade-hub.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "seed": 42 }"#).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tick_rate_ms, 16);
        assert_eq!(config.drop_interval_ms, 1000);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let dir = std::env::temp_dir().join(format!("arcade-hub-cfg-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ArcadeError::Config { .. }));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = Config::load(Path::new("/definitely/not/here.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = Config::from_json(r#"{ "seed": 1, "tick_rate_ms": 30 }"#).unwrap();
        let cli = Cli {
            seed: Some(7),
            tick_rate_ms: Some(0),
            log_level: Some("debug".into()),
            ..Default::default()
        };
        config.apply_cli(&cli);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.tick_rate_ms, 1);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_zero_tick_rate_in_file_is_clamped() {
        let dir = std::env::temp_dir().join(format!("arcade-hub-tick-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("zero.json");
        fs::write(&path, r#"{ "tick_rate_ms": 0 }"#).unwrap();

        let cli = Cli {
            config: Some(path),
            ..Default::default()
        };
        let config = Config::resolve(&cli).unwrap();
        assert_eq!(config.tick_rate_ms, 1);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from(["arcade-hub", "--seed", "9", "--tick-rate", "20"]);
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.tick_rate_ms, Some(20));
        assert!(cli.config.is_none());
    }
}
