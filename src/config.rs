//! Configuration loading
//!
//! Reads `~/.config/smartnotes/config.toml` (or an explicit `--config` path)
//! into [`Config`]. A missing default file means "use defaults"; a missing
//! explicit file is an error.

use std::path::{Path, PathBuf};

mod types;

pub use types::{AiConfig, Config, GatewayConfig, NotificationConfig};

use crate::error::NotesError;

const CONFIG_DIR: &str = "smartnotes";
const CONFIG_FILE: &str = "config.toml";

/// Default location of the config file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load configuration from `path`, or from the default location when `None`
pub fn load_config(path: Option<&Path>) -> Result<Config, NotesError> {
    match path {
        Some(explicit) => {
            let contents =
                std::fs::read_to_string(explicit).map_err(|source| NotesError::ConfigRead {
                    path: explicit.display().to_string(),
                    source,
                })?;
            parse_config(&contents)
        }
        None => match default_config_path() {
            Some(default) if default.exists() => load_config(Some(&default)),
            _ => Ok(Config::default()),
        },
    }
}

pub fn parse_config(contents: &str) -> Result<Config, NotesError> {
    Ok(toml::from_str(contents)?)
}

/// Human-readable config location used in error messages
pub fn describe_config_location(path: Option<&Path>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => default_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| format!("~/.config/{}/{}", CONFIG_DIR, CONFIG_FILE)),
    }
}
