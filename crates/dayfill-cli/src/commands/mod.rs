pub mod config;
pub mod plan;

use dayfill_core::{Config, ConfigError};
use std::path::{Path, PathBuf};

/// Config file in use: the `--config` override or the default location.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::default_path(),
    }
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    Config::load_from(&config_path(explicit)?)
}
