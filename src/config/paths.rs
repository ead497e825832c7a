//! Platform-specific configuration paths.

use crate::constants::{APP_NAME, CONFIG_ENV, CONFIG_FILE_NAME};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::ffi::OsString;
use std::path::PathBuf;

/// Get the configuration directory for the current platform.
///
/// - Linux: `~/.config/geolens/`
/// - macOS: `~/Library/Application Support/geolens/`
/// - Windows: `%APPDATA%\geolens\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the config file.
///
/// `GEOLENS_CONFIG` wins over the platform directory when set and non-empty.
pub fn config_file_path() -> Result<PathBuf> {
    config_file_path_from(std::env::var_os(CONFIG_ENV))
}

fn config_file_path_from(override_path: Option<OsString>) -> Result<PathBuf> {
    match override_path.filter(|p| !p.is_empty()) {
        Some(path) => Ok(PathBuf::from(path)),
        None => Ok(config_dir()?.join(CONFIG_FILE_NAME)),
    }
}
