//! Reading and writing `config.toml`.

use crate::config::Config;
use crate::error::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// First line of every file written by [`save_config`].
const FILE_HEADER: &str = "# geolens configuration\n# Command line flags and GEOLENS_* variables override these values.\n\n";

/// Parse `path` as a geolens config; a missing file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let read_error = |source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    };
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => return Err(read_error(e)),
    };

    let config = toml::from_str(&contents).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load `GEOLENS_CONFIG` or the platform config file.
///
/// Without a usable config directory the defaults apply.
pub fn load_default_config() -> Result<Config> {
    match super::config_file_path() {
        Ok(path) => load_config_file(&path),
        Err(e) => {
            warn!("{e}; using default configuration");
            Ok(Config::default())
        }
    }
}

/// Write `config` to `path` as commented TOML, creating parent directories.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    let write_error = |source| Error::ConfigWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let body = toml::to_string_pretty(config).map_err(|source| Error::ConfigSerialize { source })?;
    std::fs::write(path, format!("{FILE_HEADER}{body}")).map_err(write_error)?;
    debug!("Wrote config to {}", path.display());
    Ok(())
}

/// Write `config` to the resolved config path and return that path.
pub fn save_default_config(config: &Config) -> Result<PathBuf> {
    let path = super::config_file_path()?;
    save_config(config, &path)?;
    Ok(path)
}
