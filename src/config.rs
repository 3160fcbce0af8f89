//! Upload configuration
//!
//! Defaults target the public savvyanalysis.com service. Environment
//! variables overlay the defaults and command-line flags override both.

use std::env;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://www.savvyanalysis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_BASE_URL: &str = "SKYVIEW_BASE_URL";
pub const ENV_INSECURE: &str = "SKYVIEW_INSECURE";
pub const ENV_TIMEOUT_SECS: &str = "SKYVIEW_TIMEOUT_SECS";

/// Settings for talking to the analysis service
#[derive(Debug, Clone, PartialEq)]
pub struct UploadConfig {
    /// Service root without trailing slash
    pub base_url: String,
    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
    pub timeout: Duration,
    /// Value of the `name` form field, defaults to the uploaded file's name
    pub upload_name: Option<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            accept_invalid_certs: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            upload_name: None,
        }
    }
}

impl UploadConfig {
    /// Defaults overlaid with `SKYVIEW_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = url;
        }

        if let Some(flag) = lookup(ENV_INSECURE) {
            config.accept_invalid_certs = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(value = %raw, "ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }

        let base_url = std::mem::take(&mut config.base_url);
        config.with_base_url(base_url)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }

    /// Absolute URL for a service path such as `/login`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = UploadConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(!config.accept_invalid_certs);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.upload_name.is_none());
    }

    #[test]
    fn test_env_overlay() {
        let config = UploadConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "http://localhost:8080/"),
            (ENV_INSECURE, "true"),
            (ENV_TIMEOUT_SECS, "5"),
        ]));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(config.accept_invalid_certs);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout_keeps_default() {
        let config = UploadConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "soon")]));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let config = UploadConfig::default().with_base_url("https://example.test/");
        assert_eq!(config.endpoint("/login"), "https://example.test/login");
        assert_eq!(
            config.endpoint("upload_files/42"),
            "https://example.test/upload_files/42"
        );
    }
}
