use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::error::ScopeError;
use crate::settings::load::load_settings;
use crate::settings::model::Settings;
use crate::settings::save::save_settings;

/// Anything the render loop can hand settings to for safekeeping.
/// A failure is logged by the sink and returned for display; it never
/// stops the caller.
pub trait SettingsSink {
    fn persist(&mut self, settings: &Settings) -> Result<(), ScopeError>;
}

/// File-backed settings with self-healing load.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Defaults when the file is missing or unreadable. A corrupt file is
    /// deleted so the next start does not trip over it again.
    pub fn load(&self) -> Settings {
        match load_settings(&self.path) {
            Ok(Some(settings)) => {
                info!("Loaded settings from {}", self.path.display());
                settings
            }
            Ok(None) => Settings::default(),
            Err(ScopeError::ConfigCorrupt(reason)) => {
                warn!("Error loading config {}: {}", self.path.display(), reason);
                match std::fs::remove_file(&self.path) {
                    Ok(()) => warn!("Corrupt config file removed. Resetting settings to default."),
                    Err(e) => error!("Could not remove corrupt config file: {}", e),
                }
                Settings::default()
            }
            Err(e) => {
                warn!("Error loading config {}: {}", self.path.display(), e);
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), ScopeError> {
        save_settings(&self.path, settings)
    }
}

impl SettingsSink for SettingsStore {
    fn persist(&mut self, settings: &Settings) -> Result<(), ScopeError> {
        match self.save(settings) {
            Ok(()) => {
                info!("Settings saved to {}", self.path.display());
                Ok(())
            }
            Err(e) => {
                error!("Error saving config: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("scope.json"))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = store_in(&dir).load();
        assert_eq!(
            settings,
            Settings {
                device_index: None,
                gain: 1.0,
                smoothing: 0.8,
            }
        );
    }

    #[test]
    fn saved_settings_reload_unchanged() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        for (index, gain, smoothing) in [(0, 0.5, 0.0), (3, 17.3, 0.42), (12, 50.0, 0.99)] {
            let settings = Settings {
                device_index: Some(index),
                gain,
                smoothing,
            };
            store.save(&settings).unwrap();
            assert_eq!(store.load(), settings);
        }
    }

    #[test]
    fn corrupt_file_is_removed() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();

        assert_eq!(store.load(), Settings::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn wrong_types_count_as_corrupt() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"device_index": -2, "gain": "loud"}"#).unwrap();

        assert_eq!(store.load(), Settings::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn non_object_document_is_corrupt() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "[1, 2, 3]").unwrap();

        assert_eq!(store.load(), Settings::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn missing_and_unknown_fields_fall_back() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"gain": 4, "fullscreen": true}"#).unwrap();

        let settings = store.load();
        assert_eq!(settings.device_index, None);
        assert_eq!(settings.gain, 4.0);
        assert_eq!(settings.smoothing, 0.8);
        assert!(store.path().exists());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            r#"{"device_index": 1, "gain": 400.0, "smoothing": -1.0}"#,
        )
        .unwrap();

        let settings = store.load();
        assert_eq!(settings.gain, 50.0);
        assert_eq!(settings.smoothing, 0.0);
    }

    #[test]
    fn writes_only_canonical_fields() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store
            .save(&Settings {
                device_index: Some(2),
                gain: 2.0,
                smoothing: 0.5,
            })
            .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        let object = written.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(object["device_index"], 2);
        assert!(object["gain"].is_f64());
        assert!(object["smoothing"].is_f64());
    }

    #[test]
    fn incomplete_settings_are_never_written() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let result = store.save(&Settings::default());
        assert!(matches!(result, Err(ScopeError::IncompleteSettings)));
        assert!(!store.path().exists());
    }

    #[test]
    fn save_failure_is_not_fatal() {
        let dir = tempdir().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = dir.path().join("taken");
        std::fs::create_dir(&path).unwrap();
        let mut store = SettingsStore::new(&path);
        let settings = Settings {
            device_index: Some(0),
            ..Settings::default()
        };
        assert!(store.save(&settings).is_err());
        assert!(store.persist(&settings).is_err());
    }
}
