use std::env;
use std::time::Duration;

/// Production metrics API.
pub const DEFAULT_BASE_URL: &str = "https://data-analysis-app-8szn.onrender.com";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "DASHBOARD_API_BASE_URL";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid API base URL {0:?}: expected an http:// or https:// URL")]
    InvalidBaseUrl(String),
}

/// Where the dashboard fetches its metrics from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Base URL without a trailing slash; resource paths are appended to it
    pub base_url: String,
    /// Transport-level timeout for each request
    pub request_timeout: Duration,
}

impl DashboardConfig {
    /// Build a config for an explicit base URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            ..Self::default()
        })
    }

    /// Load configuration from the environment.
    ///
    /// Only the base URL is configurable; when the variable is unset the
    /// production API is used.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::with_base_url(&url),
            _ => Ok(Self::default()),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());

    if has_host {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidBaseUrl(raw.to_string()))
    }
}
