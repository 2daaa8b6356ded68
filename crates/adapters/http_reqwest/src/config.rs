//! Backend connection configuration.

use serde::Deserialize;

/// Where the backend listens and how long to wait for it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Base URL of the backend, without a trailing `/api`.
    pub base_url: String,
    /// Per-request timeout in seconds; no timeout when absent.
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:55666".to_string(),
            timeout_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_local_backend_without_timeout() {
        let config = HttpConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:55666");
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn should_fill_missing_fields_with_defaults() {
        let config: HttpConfig = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:55666");
        assert_eq!(config.timeout_secs, Some(5));
    }
}
