use std::time::Duration;

use paydesk_core::constants::{DEFAULT_API_URL, DEFAULT_BANNER_MILLIS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub request_timeout: Duration,
    pub banner_ttl: Duration,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Bad numbers fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("PAYDESK_API_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let timeout_ms: u64 = lookup("PAYDESK_REQUEST_TIMEOUT_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(30000);
        let banner_ms: u64 = lookup("PAYDESK_BANNER_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_BANNER_MILLIS);
        let log_format = match lookup("PAYDESK_LOG_FORMAT") {
            Some(s) if s.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        Self {
            api_url,
            request_timeout: Duration::from_millis(timeout_ms),
            banner_ttl: Duration::from_millis(banner_ms),
            log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]);
        assert_eq!(config.api_url, "https://dev-space.su/api/v1/a");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.banner_ttl, Duration::from_secs(3));
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("PAYDESK_API_URL", "http://localhost:9000/api/v1/a/"),
            ("PAYDESK_REQUEST_TIMEOUT_MS", "500"),
            ("PAYDESK_BANNER_MS", "1000"),
            ("PAYDESK_LOG_FORMAT", "JSON"),
        ]);
        assert_eq!(config.api_url, "http://localhost:9000/api/v1/a");
        assert_eq!(config.request_timeout, Duration::from_millis(500));
        assert_eq!(config.banner_ttl, Duration::from_secs(1));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let config = config(&[("PAYDESK_REQUEST_TIMEOUT_MS", "soon")]);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
