//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Environment variable that switches telemetry on (`"1"`) or off (anything else).
pub const TELEMETRY_ENV_VAR: &str = "ENABLE_TELEMETRY";

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;
        Self::expand_paths(&mut config);
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to defaults plus
    /// environment overrides.
    pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let mut config = Config::default();
                Self::apply_env_overrides(&mut config);
                Ok(config)
            }
        }
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.deepclick`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }

    fn expand_path_buf(path: &Path) -> PathBuf {
        match path.to_str() {
            Some(s) => PathBuf::from(Self::expand_path(s)),
            None => path.to_path_buf(),
        }
    }

    fn expand_paths(config: &mut Config) {
        if let Some(dir) = config.browser.profile_dir.as_mut() {
            *dir = Self::expand_path_buf(dir);
        }
        if let Some(dir) = config.browser.screenshots_dir.as_mut() {
            *dir = Self::expand_path_buf(dir);
        }
        config.logging.log_dir = Self::expand_path_buf(&config.logging.log_dir);
        config.telemetry.installation_id_file =
            Self::expand_path_buf(&config.telemetry.installation_id_file);
    }

    /// Apply process environment overrides on top of file values.
    pub fn apply_env_overrides(config: &mut Config) {
        let telemetry = std::env::var(TELEMETRY_ENV_VAR).ok();
        Self::apply_telemetry_override(config, telemetry.as_deref());
    }

    fn apply_telemetry_override(config: &mut Config, value: Option<&str>) {
        if let Some(value) = value {
            config.telemetry.enabled = value == "1";
        }
    }
}
