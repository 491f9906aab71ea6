//! Config file discovery and loading.
//!
//! Settings live at `$XDG_CONFIG_HOME/tsuzuri/config.toml`, falling back to
//! `$HOME/.config/tsuzuri/config.toml`. Without a file the embedded
//! defaults apply.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use tsuzuri_core::settings::{self, parse_settings_toml, Settings, SettingsError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

pub fn config_path_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let base = match xdg_config_home.filter(|d| !d.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(home.filter(|d| !d.is_empty())?).join(".config"),
    };
    Some(base.join("tsuzuri").join("config.toml"))
}

pub fn config_path() -> Option<PathBuf> {
    config_path_from(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

/// Read and parse one settings file. Every failure is an error.
pub fn load_settings_file(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_settings_toml(&content)?)
}

/// Contents of the config file at `path`, if it can be read.
///
/// A missing file is normal. An unreadable one is logged and ignored so
/// the input method still starts with its defaults.
fn read_config(path: Option<&Path>) -> Option<String> {
    let path = path?;
    match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!(path = %path.display(), "config loaded");
            Some(content)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
            None
        }
    }
}

/// Install the config at `path` (or the defaults) as the process-wide
/// settings and return them. A file that does not parse is an error.
pub fn install(path: Option<&Path>) -> Result<&'static Settings, ConfigError> {
    if let Some(content) = read_config(path) {
        settings::init_custom(content)?;
    }
    Ok(settings::settings())
}
