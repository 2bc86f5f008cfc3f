//! Flat JSON preference store in the per-user config directory.
//!
//! Two known keys: `theme` ("light" | "dark") and `userData` (an opaque
//! JSON value forwarded to the page verbatim). Every write rewrites the
//! whole record; there are no merge semantics and no migration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Directory identity shared by the preference file and the WebView2 profile.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "ChatDock", "ChatDock")
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no writable per-user config directory")]
    NoConfigDir,
    #[error("failed to read preference file: {0}")]
    Io(#[from] io::Error),
    #[error("preference file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default, rename = "userData", skip_serializing_if = "Option::is_none")]
    pub user_data: Option<Value>,
}

/// Interface the rest of the app depends on; the concrete store is
/// injected at startup.
pub trait PreferenceStore {
    fn theme(&self) -> Theme;
    fn set_theme(&mut self, theme: Theme);
    fn user_data(&self) -> Option<&Value>;
    fn set_user_data(&mut self, data: Value);
    /// Persist the whole record. Failures are logged and swallowed.
    fn save(&self);

    fn toggle_theme(&mut self) -> Theme {
        let next = self.theme().toggled();
        self.set_theme(next);
        next
    }
}

/// File-backed store. Absent file means defaults; an unreadable or
/// malformed file is an initialization error rather than a silent default.
pub struct JsonPrefStore {
    path: PathBuf,
    prefs: Preferences,
}

impl JsonPrefStore {
    pub fn open() -> Result<Self, StoreError> {
        let dirs = project_dirs().ok_or(StoreError::NoConfigDir)?;
        Self::open_at(dirs.config_dir().join("prefs.json"))
    }

    pub fn open_at(path: PathBuf) -> Result<Self, StoreError> {
        let prefs = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Preferences::default(),
            Err(e) => return Err(StoreError::Io(e)),
        };
        Ok(Self { path, prefs })
    }
}

impl PreferenceStore for JsonPrefStore {
    fn theme(&self) -> Theme {
        self.prefs.theme
    }

    fn set_theme(&mut self, theme: Theme) {
        self.prefs.theme = theme;
        self.save();
    }

    fn user_data(&self) -> Option<&Value> {
        self.prefs.user_data.as_ref()
    }

    fn set_user_data(&mut self, data: Value) {
        self.prefs.user_data = Some(data);
        self.save();
    }

    fn save(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(&self.prefs) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    log::warn!("failed to write preferences: {e}");
                }
            }
            Err(e) => log::warn!("failed to serialize preferences: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_light() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Preferences::default().theme, Theme::Light);
    }

    #[test]
    fn theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }

    #[test]
    fn toggling_twice_restores_theme() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn record_roundtrip_keeps_user_data_verbatim() {
        let blob = serde_json::json!({ "drafts": [1, 2, 3], "nested": { "k": "v" } });
        let prefs = Preferences {
            theme: Theme::Dark,
            user_data: Some(blob.clone()),
        };
        let json = serde_json::to_string(&prefs).unwrap();
        let loaded: Preferences = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.theme, Theme::Dark);
        assert_eq!(loaded.user_data, Some(blob));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let loaded: Preferences = serde_json::from_str("{}").unwrap();
        assert_eq!(loaded.theme, Theme::Light);
        assert!(loaded.user_data.is_none());
    }
}
