use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const API_URL_VAR: &str = "NEWSDESK_API_URL";
pub const TIMEOUT_VAR: &str = "NEWSDESK_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} is not a usable http(s) url: {value}")]
    InvalidUrl { var: &'static str, value: String },
    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Connection settings for the backend API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Crawls and evaluations can take minutes, so this stays generous.
    pub request_timeout: Duration,
    pub max_download_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            max_download_bytes: 50 * 1024 * 1024,
        }
    }
}

impl ClientSettings {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup; unset or blank keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Some(value) = non_blank(lookup(API_URL_VAR)) {
            let parsed = Url::parse(&value).map_err(|_| ConfigError::InvalidUrl {
                var: API_URL_VAR,
                value: value.clone(),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
                return Err(ConfigError::InvalidUrl {
                    var: API_URL_VAR,
                    value,
                });
            }
            settings.base_url = value;
        }

        if let Some(value) = non_blank(lookup(TIMEOUT_VAR)) {
            let secs = value
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout {
                    var: TIMEOUT_VAR,
                    value: value.clone(),
                })?;
            settings.request_timeout = Duration::from_secs(secs);
        }

        Ok(settings)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let settings = ClientSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, ClientSettings::default());
        assert_eq!(settings.base_url, "http://localhost:8000");
        assert_eq!(settings.request_timeout, Duration::from_secs(300));
    }

    #[test]
    fn overrides_are_read() {
        let settings = ClientSettings::from_lookup(lookup(&[
            (API_URL_VAR, " https://news.example.com/api "),
            (TIMEOUT_VAR, "45"),
        ]))
        .unwrap();
        assert_eq!(settings.base_url, "https://news.example.com/api");
        assert_eq!(settings.request_timeout, Duration::from_secs(45));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ClientSettings::from_lookup(lookup(&[(API_URL_VAR, "ftp://host")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        let err = ClientSettings::from_lookup(lookup(&[(TIMEOUT_VAR, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));

        let err = ClientSettings::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }
}
