use super::*;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_invalid_port() {
    let mut config = Config::default();
    config.browser.debug_port = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "browser.debug_port"));
}

#[test]
fn test_validate_zero_viewport() {
    let mut config = Config::default();
    config.browser.viewport_height = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "browser.viewport"));
}

#[test]
fn test_validate_zero_timeouts() {
    let mut config = Config::default();
    config.interaction.scroll_timeout_ms = 0;
    config.interaction.settle_window_ms = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert_eq!(result.errors.len(), 2);
    assert!(
        result
            .errors
            .iter()
            .any(|e| e.path == "interaction.scroll_timeout_ms")
    );
    assert!(
        result
            .errors
            .iter()
            .any(|e| e.path == "interaction.settle_window_ms")
    );
}

#[test]
fn test_validate_long_settle_window_warning() {
    let mut config = Config::default();
    config.interaction.settle_window_ms = 6_000;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(
        result
            .warnings
            .iter()
            .any(|w| w.path == "interaction.settle_window_ms")
    );
}

#[test]
fn test_validate_poll_longer_than_timeout_warning() {
    let mut config = Config::default();
    config.interaction.visibility_poll_ms = 500;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(
        result
            .warnings
            .iter()
            .any(|w| w.path == "interaction.visibility_poll_ms")
    );
}

#[test]
fn test_validate_empty_log_level() {
    let mut config = Config::default();
    config.logging.level = "  ".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "logging.level"));
}

#[test]
fn test_into_result_returns_first_error() {
    let mut config = Config::default();
    config.browser.debug_port = 0;

    let err = ConfigValidator::validate(&config).into_result().unwrap_err();
    match err {
        ConfigError::InvalidValue { field, .. } => assert_eq!(field, "browser.debug_port"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_into_result_passes_warnings_through() {
    let mut config = Config::default();
    config.interaction.settle_window_ms = 10_000;

    let warnings = ConfigValidator::validate(&config).into_result().unwrap();
    assert_eq!(warnings.len(), 1);
}

#[test]
fn test_validation_result_add_error() {
    let mut result = ValidationResult::default();
    assert!(result.is_valid());
    result.add_error(ValidationError::new("path", "message"));
    assert!(!result.is_valid());
}
