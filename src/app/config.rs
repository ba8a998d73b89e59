// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Application configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::http::ClientConfig;

/// Environment variable overriding the backend address
pub const ENV_BASE_URL: &str = "EXAM_API_BASE_URL";
/// Environment variable overriding the call timeout, in milliseconds
pub const ENV_TIMEOUT_MS: &str = "EXAM_API_TIMEOUT_MS";
/// Environment variable naming the cookie persistence file
pub const ENV_COOKIE_FILE: &str = "EXAM_SESSION_COOKIES";
/// Environment variable turning on request/response body logging
pub const ENV_LOG_BODIES: &str = "EXAM_LOG_BODIES";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP client settings
    pub client: ClientConfig,
    /// Login route; target of guard redirects and session expiry
    pub login_path: String,
    /// Where cookies are loaded from and saved to
    pub cookie_file: Option<PathBuf>,
    /// Log call bodies at debug level
    pub log_bodies: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            login_path: "/login".to_string(),
            cookie_file: None,
            log_bodies: false,
        }
    }
}

impl AppConfig {
    /// Create a new app config
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.client = config.client.base_url(base_url);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let ms = raw.trim().parse::<u64>().map_err(|e| {
                Error::Config(format!("{} must be a number of milliseconds: {}", ENV_TIMEOUT_MS, e))
            })?;
            config.client = config.client.timeout(Duration::from_millis(ms));
        }

        if let Some(path) = lookup(ENV_COOKIE_FILE) {
            config.cookie_file = Some(PathBuf::from(path));
        }

        if let Some(raw) = lookup(ENV_LOG_BODIES) {
            config.log_bodies = matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        config.client.parsed_base_url()?;
        Ok(config)
    }

    /// Set backend address
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client = self.client.base_url(base_url);
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.timeout(timeout);
        self
    }

    /// Log call bodies
    pub fn log_bodies(mut self, log_bodies: bool) -> Self {
        self.log_bodies = log_bodies;
        self
    }

    /// Set the cookie persistence file
    pub fn cookie_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookie_file = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.client.base_url, "http://127.0.0.1:8000/api");
        assert_eq!(config.client.timeout, Duration::from_secs(5));
        assert_eq!(config.login_path, "/login");
        assert!(config.cookie_file.is_none());
        assert!(!config.log_bodies);
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "https://exams.example.com/api"),
            (ENV_TIMEOUT_MS, "1500"),
            (ENV_COOKIE_FILE, "/tmp/cookies.json"),
            (ENV_LOG_BODIES, "true"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.client.base_url, "https://exams.example.com/api");
        assert_eq!(config.client.timeout, Duration::from_millis(1500));
        assert_eq!(config.cookie_file, Some(PathBuf::from("/tmp/cookies.json")));
        assert!(config.log_bodies);
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let err = AppConfig::from_lookup(|k| (k == ENV_TIMEOUT_MS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = AppConfig::from_lookup(|k| (k == ENV_BASE_URL).then(|| "::".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
