//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `autopanel.toml` in the working directory unless `--config`
//! names another file. Every field has a sensible default so the default
//! file is optional. Environment variables take precedence over file values.

use std::path::Path;

use autopanel_adapter_http_reqwest::HttpConfig;
use serde::Deserialize;

const DEFAULT_PATH: &str = "autopanel.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend connection settings.
    pub backend: HttpConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `path` (or `autopanel.toml` when absent),
    /// then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed, if an explicitly given
    /// file cannot be read, or if the result fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path, true)?,
            None => Self::from_file(Path::new(DEFAULT_PATH), false)?,
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("AUTOPANEL_BACKEND_URL") {
            self.backend.base_url = val;
        }
        if let Some(val) = lookup("AUTOPANEL_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.backend.timeout_secs = Some(secs);
            }
        }
        if let Some(val) = lookup("AUTOPANEL_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.backend.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "backend base_url must start with http:// or https://, got `{url}`"
            )));
        }
        if self.backend.timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "backend timeout_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "autopanel=info,autopanel_app=info,autopanel_adapter_http_reqwest=warn"
                .to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:55666");
        assert!(config.backend.timeout_secs.is_none());
        assert!(config.logging.filter.contains("autopanel=info"));
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:55666");
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [backend]
            base_url = 'http://192.168.1.20:55666'
            timeout_secs = 10

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.backend.base_url, "http://192.168.1.20:55666");
        assert_eq!(config.backend.timeout_secs, Some(10));
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_return_default_when_default_file_not_found() {
        let config = Config::from_file(Path::new("nonexistent.toml"), false).unwrap();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:55666");
    }

    #[test]
    fn should_fail_when_explicit_file_not_found() {
        let result = Config::from_file(Path::new("nonexistent.toml"), true);
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn should_apply_env_overrides_with_rust_log_last() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("AUTOPANEL_BACKEND_URL", "https://panel.local"),
            ("AUTOPANEL_TIMEOUT_SECS", "15"),
            ("AUTOPANEL_LOG", "warn"),
            ("RUST_LOG", "trace"),
        ]));
        assert_eq!(config.backend.base_url, "https://panel.local");
        assert_eq!(config.backend.timeout_secs, Some(15));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparsable_timeout_override() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("AUTOPANEL_TIMEOUT_SECS", "soon")]));
        assert!(config.backend.timeout_secs.is_none());
    }

    #[test]
    fn should_reject_base_url_without_scheme() {
        let mut config = Config::default();
        config.backend.base_url = "127.0.0.1:55666".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_zero_timeout() {
        let mut config = Config::default();
        config.backend.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
