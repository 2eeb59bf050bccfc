use std::path::Path;

use crate::error::ScopeError;
use crate::settings::model::{PersistedSettings, Settings};

/// Write the settings atomically: temp file in the same directory, then
/// rename over the target.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), ScopeError> {
    let persisted = PersistedSettings::try_from(settings)?;
    let json = serde_json::to_string_pretty(&persisted)
        .map_err(|e| ScopeError::Io(std::io::Error::other(e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json)?;

    // rename does not replace an existing file on Windows
    if cfg!(windows) && path.exists() {
        std::fs::remove_file(path)?;
    }
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}
