//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TRENDX_API_BASE` - Root URL of the shop REST API (default: `http://127.0.0.1:5000/api`)
//! - `TRENDX_POLL_INTERVAL_SECS` - Auto-refresh period in seconds (default: 30)

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default API root of a locally running backend.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000/api";

/// Default auto-refresh period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Dashboard client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// API root without a trailing slash; endpoint paths are appended to it.
    pub api_base: String,
    /// Period of the active-section poller.
    pub poll_interval: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base = parse_api_base(
            "TRENDX_API_BASE",
            &get_env_or_default("TRENDX_API_BASE", DEFAULT_API_BASE),
        )?;
        let poll_interval = parse_poll_interval(
            "TRENDX_POLL_INTERVAL_SECS",
            &get_env_or_default("TRENDX_POLL_INTERVAL_SECS", "30"),
        )?;

        Ok(Self {
            api_base,
            poll_interval,
        })
    }

    /// Replace the API root, e.g. from a command-line flag.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `api_base` is not an absolute http(s) URL.
    pub fn with_api_base(mut self, api_base: &str) -> Result<Self, ConfigError> {
        self.api_base = parse_api_base("--api-base", api_base)?;
        Ok(self)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate an API root and strip its trailing slash.
fn parse_api_base(key: &str, raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not contain a query or fragment".to_string(),
        ));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn parse_poll_interval(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be at least 1 second".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}
