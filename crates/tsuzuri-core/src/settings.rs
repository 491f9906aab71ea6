//! Input method settings: startup mode, popup emulation and key bindings.
//!
//! The process-wide [`settings()`] come from the TOML handed to
//! [`init_custom`] or, failing that, from the embedded
//! `default_settings.toml`.
//!
//! A binding that fails to parse is logged and skipped; it never prevents
//! the rest of the file from loading.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::warn;

use crate::binding::{Binding, BindingClass, BindingError, BindingSet};

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Install `toml_content` as the settings source. Must run before the
/// first [`settings()`] call; the content is validated first.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Settings shared by every seat, parsed on first use.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("embedded or pre-validated settings TOML")
    })
}

pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("settings already initialized")]
    AlreadyInitialized,
}

/// A binding entry that was skipped while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedBinding {
    pub class: BindingClass,
    pub chord: String,
    pub action: String,
    pub error: BindingError,
}

#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// New seats start composing rather than disabled.
    pub active_at_startup: bool,
    /// Show the preedit popup while composing and open the candidate list
    /// as soon as selection begins.
    pub emulate_im_popups: bool,
    pub bindings: BindingSet,
    pub rejected: Vec<RejectedBinding>,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default)]
    active_at_startup: bool,
    #[serde(default)]
    emulate_im_popups: bool,
    #[serde(default)]
    bindings: RawBindings,
}

#[derive(Debug, Default, Deserialize)]
struct RawBindings {
    #[serde(default)]
    global: BTreeMap<String, String>,
    #[serde(default)]
    composing: BTreeMap<String, String>,
    #[serde(default)]
    selecting: BTreeMap<String, String>,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let raw: RawSettings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;

    let mut s = Settings {
        active_at_startup: raw.active_at_startup,
        emulate_im_popups: raw.emulate_im_popups,
        ..Default::default()
    };
    let classes = [
        (BindingClass::Global, &raw.bindings.global),
        (BindingClass::Composing, &raw.bindings.composing),
        (BindingClass::Selecting, &raw.bindings.selecting),
    ];
    for (class, table) in classes {
        for (chord, action) in table {
            match Binding::parse(chord, action) {
                Ok(binding) => s.bindings.push(class, binding),
                Err(error) => {
                    warn!(%class, %chord, %action, %error, "binding ignored");
                    s.rejected.push(RejectedBinding {
                        class,
                        chord: chord.clone(),
                        action: action.clone(),
                        error,
                    });
                }
            }
        }
    }
    Ok(s)
}
