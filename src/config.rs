//! Runtime configuration.
//!
//! Everything has a built-in default; a handful of values can be overridden
//! through environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.jamendo.com/v3.0";
pub const DEFAULT_CLIENT_ID: &str = "04b90385";
pub const DEFAULT_PAGE_SIZE: usize = 30;
pub const MAX_PAGE_SIZE: usize = 200;
pub const DEFAULT_LOG_DIR: &str = ".logs";

/// How often the transport bar reads position/duration back from the output.
pub const PROGRESS_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const TOAST_LIFETIME: Duration = Duration::from_secs(3);
/// Window after next/previous during which play/pause is ignored.
pub const TRACK_CHANGE_DEBOUNCE: Duration = Duration::from_millis(500);
pub const VOLUME_STEP: f32 = 0.05;
pub const SEEK_STEP_SECS: f64 = 5.0;

const ENV_CLIENT_ID: &str = "JAMENDO_CLIENT_ID";
const ENV_API_URL: &str = "JAMENDO_API_URL";
const ENV_PAGE_SIZE: &str = "JAMENDO_PAGE_SIZE";
const ENV_LOG_DIR: &str = "JAMENDO_LOG_DIR";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub client_id: String,
    pub page_size: usize,
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(client_id) = non_empty(lookup(ENV_CLIENT_ID)) {
            config.client_id = client_id;
        }
        if let Some(api_url) = non_empty(lookup(ENV_API_URL)) {
            config.api_url = api_url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = non_empty(lookup(ENV_PAGE_SIZE)) {
            match raw.parse::<usize>() {
                Ok(size) if (1..=MAX_PAGE_SIZE).contains(&size) => config.page_size = size,
                _ => tracing::warn!(
                    value = %raw,
                    default = DEFAULT_PAGE_SIZE,
                    "Ignoring invalid {}",
                    ENV_PAGE_SIZE
                ),
            }
        }
        if let Some(log_dir) = non_empty(lookup(ENV_LOG_DIR)) {
            config.log_dir = PathBuf::from(log_dir);
        }

        config
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
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
    fn defaults_without_overrides() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.page_size, 30);
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("JAMENDO_CLIENT_ID", "abc123"),
            ("JAMENDO_API_URL", "http://localhost:8080/v3.0/"),
            ("JAMENDO_PAGE_SIZE", "10"),
            ("JAMENDO_LOG_DIR", "/tmp/jam-logs"),
        ]));
        assert_eq!(config.client_id, "abc123");
        assert_eq!(config.api_url, "http://localhost:8080/v3.0");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/jam-logs"));
    }

    #[test]
    fn invalid_page_size_falls_back() {
        for raw in ["0", "abc", "500", "-3"] {
            let config = Config::from_lookup(lookup_from(&[("JAMENDO_PAGE_SIZE", raw)]));
            assert_eq!(config.page_size, DEFAULT_PAGE_SIZE, "value {raw}");
        }
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = Config::from_lookup(lookup_from(&[("JAMENDO_CLIENT_ID", "   ")]));
        assert_eq!(config.client_id, DEFAULT_CLIENT_ID);
    }
}
