use std::env;
use std::time::Duration;

use cinefav_core::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_PROXY_PORT, DEFAULT_UPSTREAM_TIMEOUT_SECS,
};

/// Proxy configuration loaded from environment variables.
pub struct Config {
    /// Base URL of the upstream catalog API, without trailing slash.
    pub api_base_url: String,
    /// Port for the Axum HTTP listener.
    pub port: u16,
    /// Timeout applied to every upstream request.
    pub upstream_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `API_BASE_URL` (optional, default `http://localhost:8000`)
    /// - `PORT` (optional, default 5000)
    /// - `UPSTREAM_TIMEOUT_SECS` (optional, default 10)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let port = lookup("PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PROXY_PORT);

        let timeout_secs = lookup("UPSTREAM_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS);

        Self {
            api_base_url,
            port,
            upstream_timeout: Duration::from_secs(timeout_secs),
        }
    }
}
