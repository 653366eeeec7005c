//! Runtime configuration for the FinSight client.
//!
//! Values come from the process environment. `main` seeds the environment from
//! `.env` (desktop dev) or from the bundled `assets/config.env` (mobile/web).

use std::env;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Bundled config for mobile and web builds
pub const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

#[derive(Clone, Debug, PartialEq)]
pub struct BackendConfig {
    pub base_url: String,
    pub request_timeout: Option<Duration>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl BackendConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("FINSIGHT_BACKEND_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let request_timeout = lookup("FINSIGHT_REQUEST_TIMEOUT_SECS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            base_url,
            request_timeout,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Parse `KEY=VALUE` lines, skipping blanks and `#` comments.
pub fn parse_env_lines(source: &str) -> Vec<(String, String)> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}
