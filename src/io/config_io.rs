use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "lanes.toml";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Parse config text. Missing sections fall back to defaults.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

/// Read the config at `path`.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text, path)
}

/// Resolve the config for a run: an explicit path must exist; otherwise
/// `lanes.toml` in `dir` is used when present, and defaults when not.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => {
            let candidate = dir.join(DEFAULT_CONFIG_FILE);
            if candidate.is_file() {
                read_config(&candidate)
            } else {
                Ok(Config::default())
            }
        }
    }
}
