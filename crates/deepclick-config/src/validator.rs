//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Settle windows above this are accepted but flagged.
const SETTLE_WINDOW_WARN_MS: u64 = 5_000;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Collapse into the first error, if any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(ConfigError::InvalidValue {
                field: err.path,
                message: err.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_interaction(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "Port cannot be 0",
            ));
        }

        if config.browser.viewport_width == 0 || config.browser.viewport_height == 0 {
            result.add_error(ValidationError::new(
                "browser.viewport",
                "Viewport dimensions must be greater than 0",
            ));
        }
    }

    fn validate_interaction(config: &Config, result: &mut ValidationResult) {
        let interaction = &config.interaction;
        let timeouts = [
            ("interaction.settle_window_ms", interaction.settle_window_ms),
            ("interaction.scroll_timeout_ms", interaction.scroll_timeout_ms),
            ("interaction.visibility_timeout_ms", interaction.visibility_timeout_ms),
            ("interaction.visibility_poll_ms", interaction.visibility_poll_ms),
            ("interaction.native_click_timeout_ms", interaction.native_click_timeout_ms),
        ];
        for (path, value) in timeouts {
            if value == 0 {
                result.add_error(ValidationError::new(path, "must be greater than 0"));
            }
        }

        if interaction.settle_window_ms > SETTLE_WINDOW_WARN_MS {
            result.add_warning(ValidationWarning::new(
                "interaction.settle_window_ms",
                format!(
                    "settle window is very long (>{}ms), every click will block for it",
                    SETTLE_WINDOW_WARN_MS
                ),
            ));
        }

        if interaction.visibility_poll_ms > interaction.visibility_timeout_ms {
            result.add_warning(ValidationWarning::new(
                "interaction.visibility_poll_ms",
                "poll interval exceeds the visibility timeout, visibility is checked once",
            ));
        }

        if interaction.outer_html_max_chars == 0 {
            result.add_error(ValidationError::new(
                "interaction.outer_html_max_chars",
                "must be greater than 0",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if config.logging.level.trim().is_empty() {
            result.add_error(ValidationError::new(
                "logging.level",
                "Log level cannot be empty",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
