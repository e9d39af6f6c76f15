//! Telemetry errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Installation id file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Installation id file is empty: {0}")]
    EmptyInstallationId(String),
}
