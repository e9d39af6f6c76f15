//! # deepclick Config
//!
//! Configuration management for the deepclick interaction engine.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::{ConfigLoader, TELEMETRY_ENV_VAR};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
