//! Persisted shortcut preferences.

use std::path::Path;

use isolationist_core::input::KeyCode;
use serde::{Deserialize, Serialize};

use crate::error::PrefsError;
use crate::hotkey::HotKey;

/// Shortcuts for the two commands, stored as a small TOML file:
///
/// ```toml
/// [isolate]
/// key = "I"
///
/// [hide]
/// key = "I"
/// shift = true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub isolate: HotKey,
    pub hide: HotKey,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            isolate: HotKey::new(KeyCode::I),
            hide: HotKey::new(KeyCode::I).with_shift(),
        }
    }
}

impl Preferences {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, PrefsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads preferences from a TOML file.
    pub fn load(path: &Path) -> Result<Self, PrefsError> {
        let content = std::fs::read_to_string(path).map_err(|source| PrefsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| PrefsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes preferences to a TOML file, replacing any previous content.
    pub fn save(&self, path: &Path) -> Result<(), PrefsError> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| PrefsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads preferences, falling back to defaults if the file is missing or
    /// invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(prefs) => {
                log::info!(
                    "Loaded preferences: isolate = {}, hide = {}",
                    prefs.isolate,
                    prefs.hide
                );
                prefs
            }
            Err(e) => {
                log::warn!("No usable preferences ({e}), using defaults");
                Self::default()
            }
        }
    }
}
