//! Persistent installation id.

use std::fs;
use std::path::Path;

use uuid::Uuid;

use crate::error::TelemetryError;

/// Read the installation id from `path`, or generate a UUID v4 and store it there.
pub fn load_or_create_installation_id(path: &Path) -> Result<String, TelemetryError> {
    if path.exists() {
        let id = fs::read_to_string(path)?.trim().to_string();
        if id.is_empty() {
            return Err(TelemetryError::EmptyInstallationId(
                path.display().to_string(),
            ));
        }
        return Ok(id);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let id = Uuid::new_v4().to_string();
    fs::write(path, &id)?;
    Ok(id)
}
