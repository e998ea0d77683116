//! Environment-driven core configuration.
//!
//! # Responsibility
//! - Resolve logging and reconnect-prompt settings from `PADIZONE_*` variables.
//!
//! # Invariants
//! - Unset or blank variables fall back to defaults.
//! - Set but malformed variables are errors, never silently ignored.

use crate::engagement::reconnect::{ReconnectPolicy, DEFAULT_RECONNECT_AFTER_DAYS};
use crate::logging::{default_log_level, init_logging, normalize_log_dir};
use std::path::PathBuf;

pub const ENV_LOG_LEVEL: &str = "PADIZONE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PADIZONE_LOG_DIR";
pub const ENV_RECONNECT_AFTER_DAYS: &str = "PADIZONE_RECONNECT_AFTER_DAYS";

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub log_level: String,
    /// File logging is off when unset.
    pub log_dir: Option<PathBuf>,
    pub reconnect: ReconnectPolicy,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            reconnect: ReconnectPolicy::default(),
        }
    }
}

impl CoreConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }

        if let Some(dir) = read(ENV_LOG_DIR) {
            config.log_dir =
                Some(normalize_log_dir(&dir).map_err(|err| format!("{ENV_LOG_DIR}: {err}"))?);
        }

        if let Some(days) = read(ENV_RECONNECT_AFTER_DAYS) {
            config.reconnect = ReconnectPolicy::after_days(parse_days(&days)?);
        }

        Ok(config)
    }

    /// Starts file logging when a directory is configured.
    ///
    /// Returns `Ok(false)` when logging is not configured.
    pub fn init_logging(&self) -> Result<bool, String> {
        let Some(dir) = self.log_dir.as_ref() else {
            return Ok(false);
        };
        let dir = dir
            .to_str()
            .ok_or_else(|| format!("{ENV_LOG_DIR}: path is not valid UTF-8"))?;
        init_logging(&self.log_level, dir)?;
        Ok(true)
    }
}

fn parse_days(value: &str) -> Result<u32, String> {
    match value.parse::<u32>() {
        Ok(0) | Err(_) => Err(format!(
            "{ENV_RECONNECT_AFTER_DAYS} must be a positive whole number of days, got `{value}` \
             (default {DEFAULT_RECONNECT_AFTER_DAYS})"
        )),
        Ok(days) => Ok(days),
    }
}
