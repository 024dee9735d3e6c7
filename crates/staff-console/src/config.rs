//! # Configuration
//!
//! Every setting comes from an environment variable with a default. Falling back to a
//! default is logged so a misspelt variable shows up in the output.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `CONSOLE_BASE_URL` | `http://127.0.0.1:8000` |
//! | `CONSOLE_SESSION_FILE` | `./.staff-console/session.json` |
//! | `CONSOLE_READY_POLL_MS` | `5000` |
//! | `CONSOLE_KDS_POLL_MS` | `3000` |
//! | `CONSOLE_DWELL_SECS` | `120` |
//! | `CONSOLE_DISPLAY_SLOTS` | `2` |
//! | `CONSOLE_REQUEST_TIMEOUT_SECS` | `10` |

use reqwest::Url;
use std::collections::HashMap;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub session_file: PathBuf,
    pub ready_poll_interval: Duration,
    pub kitchen_poll_interval: Duration,
    pub dwell: Duration,
    pub display_slots: usize,
    pub request_timeout: Duration,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            session_file: PathBuf::from("./.staff-console/session.json"),
            ready_poll_interval: Duration::from_millis(5000),
            kitchen_poll_interval: Duration::from_millis(3000),
            dwell: Duration::from_secs(120),
            display_slots: 2,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl ConsoleConfig {
    /// Loads the configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Loads the configuration from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let config = Self {
            base_url: try_load(vars, "CONSOLE_BASE_URL", "http://127.0.0.1:8000")?,
            session_file: try_load(vars, "CONSOLE_SESSION_FILE", "./.staff-console/session.json")?,
            ready_poll_interval: Duration::from_millis(try_load(vars, "CONSOLE_READY_POLL_MS", "5000")?),
            kitchen_poll_interval: Duration::from_millis(try_load(vars, "CONSOLE_KDS_POLL_MS", "3000")?),
            dwell: Duration::from_secs(try_load(vars, "CONSOLE_DWELL_SECS", "120")?),
            display_slots: try_load(vars, "CONSOLE_DISPLAY_SLOTS", "2")?,
            request_timeout: Duration::from_secs(try_load(vars, "CONSOLE_REQUEST_TIMEOUT_SECS", "10")?),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(reason) = parse_base_url(&self.base_url) {
            return Err(invalid("CONSOLE_BASE_URL", &self.base_url, &reason));
        }
        if self.display_slots == 0 {
            return Err(invalid("CONSOLE_DISPLAY_SLOTS", "0", "at least one slot is required"));
        }
        for (key, value) in [
            ("CONSOLE_READY_POLL_MS", self.ready_poll_interval),
            ("CONSOLE_KDS_POLL_MS", self.kitchen_poll_interval),
            ("CONSOLE_DWELL_SECS", self.dwell),
            ("CONSOLE_REQUEST_TIMEOUT_SECS", self.request_timeout),
        ] {
            if value.is_zero() {
                return Err(invalid(key, "0", "must be greater than zero"));
            }
        }
        Ok(())
    }
}

/// Parses a backend base URL. Only absolute `http` and `https` URLs with a host pass.
pub fn parse_base_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("scheme {} is not http or https", url.scheme()));
    }
    if !url.has_host() {
        return Err("missing host".to_string());
    }
    Ok(url)
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn try_load<T: FromStr>(
    vars: &HashMap<String, String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = match vars.get(key) {
        Some(value) => value.trim().to_string(),
        None => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    };
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })
}
