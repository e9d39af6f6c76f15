//! Telemetry configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{default_true, state_dir};

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// File holding the persistent installation id.
    #[serde(default = "default_installation_id_file")]
    pub installation_id_file: PathBuf,
}

fn default_installation_id_file() -> PathBuf {
    state_dir().join("installation_id.txt")
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            installation_id_file: default_installation_id_file(),
        }
    }
}
