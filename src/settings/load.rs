use std::io::ErrorKind;
use std::path::Path;

use crate::error::ScopeError;
use crate::settings::model::{Settings, StoredSettings};

/// Read the settings file. `Ok(None)` means there is nothing on disk.
pub fn load_settings(path: &Path) -> Result<Option<Settings>, ScopeError> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            return Err(ScopeError::ConfigCorrupt(e.to_string()))
        }
        Err(e) => return Err(ScopeError::Io(e)),
    };

    let document: serde_json::Value =
        serde_json::from_str(&json).map_err(|e| ScopeError::ConfigCorrupt(e.to_string()))?;
    // serde would happily read a struct out of an array
    if !document.is_object() {
        return Err(ScopeError::ConfigCorrupt("expected a JSON object".to_string()));
    }

    let stored: StoredSettings =
        serde_json::from_value(document).map_err(|e| ScopeError::ConfigCorrupt(e.to_string()))?;
    Ok(Some(stored.into_settings()))
}
