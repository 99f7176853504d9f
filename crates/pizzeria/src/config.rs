#![forbid(unsafe_code)]

//! Application settings, read from the environment.
//!
//! | Variable                  | Meaning                                   |
//! |---------------------------|-------------------------------------------|
//! | `PIZZERIA_ENDPOINT`       | order endpoint URL                        |
//! | `PIZZERIA_TIMEOUT_MS`     | request timeout in milliseconds           |
//! | `PIZZERIA_TOPPING_POLICY` | `add-only` (default) or `toggle`          |
//! | `PIZZERIA_LOG_FILE`       | write logs to this file                   |
//! | `PIZZERIA_LOG`            | tracing filter directive, default `info`  |
//! | `PIZZERIA_INLINE`         | draw inline instead of the alt screen     |
//!
//! Values are trimmed; empty values count as unset.

use pizzeria_core::ToppingPolicy;
use pizzeria_http::{DEFAULT_ENDPOINT, HttpSubmitterConfig};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_ENDPOINT: &str = "PIZZERIA_ENDPOINT";
pub const ENV_TIMEOUT_MS: &str = "PIZZERIA_TIMEOUT_MS";
pub const ENV_TOPPING_POLICY: &str = "PIZZERIA_TOPPING_POLICY";
pub const ENV_LOG_FILE: &str = "PIZZERIA_LOG_FILE";
pub const ENV_LOG: &str = "PIZZERIA_LOG";
pub const ENV_INLINE: &str = "PIZZERIA_INLINE";

const DEFAULT_LOG_FILTER: &str = "info";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Not a non-negative integer.
    InvalidNumber { var: &'static str, value: String },
    /// Unknown topping policy name.
    InvalidPolicy { value: String },
    /// Endpoint is not an `http://` or `https://` URL.
    InvalidEndpoint { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { var, value } => {
                write!(f, "{var}: expected a whole number, got {value:?}")
            }
            Self::InvalidPolicy { value } => write!(
                f,
                "{ENV_TOPPING_POLICY}: expected add-only or toggle, got {value:?}"
            ),
            Self::InvalidEndpoint { value } => {
                write!(f, "{ENV_ENDPOINT}: expected an http(s) URL, got {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub endpoint: String,
    /// `None` keeps the transport default.
    pub timeout: Option<Duration>,
    pub topping_policy: ToppingPolicy,
    /// Without a file, logging stays off; the terminal belongs to the form.
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
    pub alternate_screen: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            topping_policy: ToppingPolicy::default(),
            log_file: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            alternate_screen: true,
        }
    }
}

impl AppConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read settings through `get_env`, falling back to defaults.
    pub fn from_env_with<F>(get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = env_string(&get_env, ENV_ENDPOINT) {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::InvalidEndpoint { value: endpoint });
            }
            config.endpoint = endpoint;
        }
        if let Some(ms) = env_u64(&get_env, ENV_TIMEOUT_MS)? {
            config.timeout = Some(Duration::from_millis(ms));
        }
        if let Some(value) = env_string(&get_env, ENV_TOPPING_POLICY) {
            config.topping_policy =
                ToppingPolicy::parse(&value).ok_or(ConfigError::InvalidPolicy { value })?;
        }
        config.log_file = env_string(&get_env, ENV_LOG_FILE).map(PathBuf::from);
        if let Some(filter) = env_string(&get_env, ENV_LOG) {
            config.log_filter = filter;
        }
        if let Some(inline) = env_flag(&get_env, ENV_INLINE) {
            config.alternate_screen = !inline;
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_topping_policy(mut self, policy: ToppingPolicy) -> Self {
        self.topping_policy = policy;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Transport settings derived from this config.
    #[must_use]
    pub fn http_config(&self) -> HttpSubmitterConfig {
        HttpSubmitterConfig::default()
            .with_endpoint(self.endpoint.clone())
            .with_timeout(self.timeout)
    }
}

fn env_string<F>(get_env: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    get_env(key).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn env_u64<F>(get_env: &F, key: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    env_string(get_env, key)
        .map(|value| {
            value
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber { var: key, value })
        })
        .transpose()
}

fn env_flag<F>(get_env: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let value = env_string(get_env, key)?;
    Some(matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn map_env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map = map_env(pairs);
        AppConfig::from_env_with(move |key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(load(&[]), Ok(AppConfig::default()));
    }

    #[test]
    fn reads_every_variable() {
        let config = load(&[
            (ENV_ENDPOINT, " https://pizza.example/api/order "),
            (ENV_TIMEOUT_MS, "2500"),
            (ENV_TOPPING_POLICY, "toggle"),
            (ENV_LOG_FILE, "/tmp/pizzeria.log"),
            (ENV_LOG, "pizzeria=debug"),
            (ENV_INLINE, "yes"),
        ])
        .expect("valid config");
        assert_eq!(config.endpoint, "https://pizza.example/api/order");
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
        assert_eq!(config.topping_policy, ToppingPolicy::Toggle);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/pizzeria.log")));
        assert_eq!(config.log_filter, "pizzeria=debug");
        assert!(!config.alternate_screen);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = load(&[(ENV_TIMEOUT_MS, "  "), (ENV_LOG, "")]).expect("valid config");
        assert_eq!(config.timeout, None);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            load(&[(ENV_TIMEOUT_MS, "soon")]),
            Err(ConfigError::InvalidNumber {
                var: ENV_TIMEOUT_MS,
                value: "soon".into()
            })
        );
        assert_eq!(
            load(&[(ENV_TOPPING_POLICY, "remove-only")]),
            Err(ConfigError::InvalidPolicy {
                value: "remove-only".into()
            })
        );
        let err = load(&[(ENV_ENDPOINT, "localhost:9009")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "PIZZERIA_ENDPOINT: expected an http(s) URL, got \"localhost:9009\""
        );
    }

    #[test]
    fn http_config_carries_endpoint_and_timeout() {
        let mut config = AppConfig::default().with_endpoint("http://127.0.0.1:1/order");
        config.timeout = Some(Duration::from_secs(3));
        let http = config.http_config();
        assert_eq!(http.endpoint, "http://127.0.0.1:1/order");
        assert_eq!(http.timeout, Some(Duration::from_secs(3)));
    }
}
