//! Configuration loading
//!
//! The config file is JSON5. Every field has a default, so a missing file
//! or an empty object is a valid configuration.
//!
//! Path resolution order:
//! 1. explicit path (`--config`)
//! 2. `CHATSHIELD_CONFIG_PATH`
//! 3. `<config dir>/chatshield/config.json5`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LoggingConfig;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "CHATSHIELD_CONFIG_PATH";

const CONFIG_DIR_NAME: &str = "chatshield";
const CONFIG_FILE_NAME: &str = "config.json5";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

/// How payloads are written by the CLI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON (ignored in line-by-line mode)
    pub pretty: bool,
}

/// Resolve the config file path, if any location is known.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Parse configuration text.
pub fn parse_config(text: &str) -> Result<Config, json5::Error> {
    if text.trim().is_empty() {
        return Ok(Config::default());
    }
    json5::from_str(text)
}

/// Load the config at `path`; a file that does not exist yields defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    parse_config(&text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load configuration from the resolved location.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match resolve_config_path(explicit) {
        Some(path) => load_config_from(&path),
        None => Ok(Config::default()),
    }
}
