//! Interaction errors.

use thiserror::Error;

use super::driver::DriverError;
use super::target::Locator;

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("Element with selector: \"{0}\" not found")]
    NotFound(Locator),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("{0}")]
    Script(String),

    #[error("No active page found. OpenURL command opens a new page.")]
    NoActivePage,
}
