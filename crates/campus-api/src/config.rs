use std::time::Duration;

/// Connection settings for the REST backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL all endpoint paths are appended to (no trailing slash)
    pub base_url: String,
    /// Per-request timeout (default: 30 seconds)
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables
    ///
    /// Reads `CAMPUS_API_URL` and `CAMPUS_API_TIMEOUT_SECS`; unset, empty,
    /// unparsable or zero values keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("CAMPUS_API_URL") {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }

        if let Ok(val) = std::env::var("CAMPUS_API_TIMEOUT_SECS") {
            if let Some(timeout) = parse_timeout(&val) {
                config.timeout = timeout;
            }
        }

        config.base_url = config.base_url.trim_end_matches('/').to_string();
        config
    }

    /// Builder-style override of the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Parse a timeout in whole seconds; zero would fail every request
fn parse_timeout(val: &str) -> Option<Duration> {
    match val.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
    }
}
