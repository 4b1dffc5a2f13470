//! Client configuration
//!
//! The backend location is a single injected setting. Every screen goes
//! through the same `ClientConfig`, so there is exactly one base URL.
//!
//! | Environment variable | Default | Meaning |
//! |----------------------|---------|---------|
//! | ATELIER_API_URL | http://localhost:8000 | backend origin, `/api/v1` is appended when missing |
//! | ATELIER_API_TOKEN | (none) | bearer token |
//! | ATELIER_API_TIMEOUT_SECS | (none) | request timeout, requests wait indefinitely when unset |
//! | ATELIER_CACHE_TTL_SECS | 60 | lifetime of cached reads |

use std::time::Duration;

/// Path prefix of every REST endpoint
pub const API_PREFIX: &str = "/api/v1";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend root including `/api/v1`, without trailing slash
    pub base_url: String,

    /// Bearer token, issued by the login flow outside this crate
    pub token: Option<String>,

    /// Request timeout in seconds, `None` leaves requests unbounded
    pub timeout: Option<u64>,

    /// How long cached reads stay fresh, in seconds
    pub cache_ttl: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.as_ref()),
            token: None,
            timeout: None,
            cache_ttl: 60,
        }
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("ATELIER_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(base_url);

        config.token = std::env::var("ATELIER_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        config.timeout = env_u64("ATELIER_API_TIMEOUT_SECS");
        if let Some(ttl) = env_u64("ATELIER_CACHE_TTL_SECS") {
            config.cache_ttl = ttl;
        }
        config
    }

    /// Load a `.env` file if there is one, then read the environment
    pub fn load() -> Self {
        if let Err(e) = dotenv::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }
        Self::from_env()
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn with_cache_ttl(mut self, seconds: u64) -> Self {
        self.cache_ttl = seconds;
        self
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    pub fn cache_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Absolute URL of an endpoint path such as `quotations/42`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Trim trailing slashes and make sure the URL ends with `/api/v1` exactly once
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.ends_with(API_PREFIX) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{API_PREFIX}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        assert_eq!(
            ClientConfig::new("http://10.0.0.5:8000").base_url,
            "http://10.0.0.5:8000/api/v1"
        );
        assert_eq!(
            ClientConfig::new("https://shop.example.com/api/v1/").base_url,
            "https://shop.example.com/api/v1"
        );
        assert_eq!(
            ClientConfig::new(" http://localhost:8000// ").base_url,
            "http://localhost:8000/api/v1"
        );
    }

    #[test]
    fn test_url_join() {
        let config = ClientConfig::default();
        assert_eq!(
            config.url("/returns/analytics"),
            "http://localhost:8000/api/v1/returns/analytics"
        );
        assert_eq!(config.url("products"), "http://localhost:8000/api/v1/products");
    }

    #[test]
    fn test_timeout_is_opt_in() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, None);
        assert_eq!(config.timeout_duration(), None);
        assert!(crate::HttpClient::new(&config).is_ok());
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::default()
            .with_token("abc")
            .with_timeout(5)
            .with_cache_ttl(0);
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout_duration(), Some(Duration::from_secs(5)));
        assert_eq!(config.cache_ttl_duration(), Duration::ZERO);
    }
}
