//! Tracker configuration loaded from TOML.
//!
//! Every field has a default, so an empty document is a valid
//! configuration:
//!
//! ```
//! use taskboard::config::TrackerConfig;
//!
//! let config = TrackerConfig::from_toml_str("[maintenance]\ninterval_secs = 60\n")
//!     .expect("valid configuration");
//! assert_eq!(config.maintenance.interval_secs, 60);
//! assert_eq!(config.policy.escalation_window_hours, 24);
//! ```

use crate::task::{adapters::webhook::WebhookSettings, policy::TaskPolicy};
use camino::Utf8Path;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;
use thiserror::Error;

/// Errors returned while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration '{path}': {source}")]
    Read {
        /// Path relative to the configuration directory.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid TOML for [`TrackerConfig`].
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Task policy settings.
    pub policy: PolicyConfig,
    /// Escalation sweep schedule.
    pub maintenance: MaintenanceConfig,
    /// Event dispatch settings.
    pub events: EventsConfig,
    /// Outbound webhook settings.
    pub webhook: WebhookConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Task policy settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// Tasks due within this many hours move up one priority step per sweep.
    pub escalation_window_hours: i64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            escalation_window_hours: crate::task::policy::DEFAULT_ESCALATION_WINDOW_HOURS,
        }
    }
}

/// Escalation sweep schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaintenanceConfig {
    /// Whether the periodic sweep runs.
    pub enabled: bool,
    /// Seconds between sweeps.
    pub interval_secs: u64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 600,
        }
    }
}

/// Event dispatch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventsConfig {
    /// Maximum number of undelivered events queued for each listener.
    pub queue_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 250,
        }
    }
}

/// Outbound webhook settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebhookConfig {
    /// Endpoint URL; blank disables the webhook.
    pub url: String,
    /// Connection timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Whole-request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            connect_timeout_ms: 3_000,
            request_timeout_ms: 5_000,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
        }
    }
}

impl TrackerConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates `file` inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// the errors of [`TrackerConfig::from_toml_str`].
    pub fn load(dir: &Dir, file: &Utf8Path) -> Result<Self, ConfigError> {
        let source = dir.read_to_string(file).map_err(|source| ConfigError::Read {
            path: file.to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.policy.escalation_window_hours < 0 {
            return Err(ConfigError::Invalid(
                "policy.escalation_window_hours must not be negative".to_owned(),
            ));
        }
        if self.maintenance.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "maintenance.interval_secs must be positive".to_owned(),
            ));
        }
        if self.events.queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "events.queue_capacity must be positive".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns the configured task policy.
    #[must_use]
    pub const fn task_policy(&self) -> TaskPolicy {
        TaskPolicy::new(self.policy.escalation_window_hours)
    }

    /// Returns the time between sweeps.
    #[must_use]
    pub const fn maintenance_period(&self) -> Duration {
        Duration::from_secs(self.maintenance.interval_secs)
    }

    /// Returns the event queue capacity, falling back to one slot for an
    /// unvalidated zero.
    #[must_use]
    pub const fn queue_capacity(&self) -> NonZeroUsize {
        match NonZeroUsize::new(self.events.queue_capacity) {
            Some(capacity) => capacity,
            None => NonZeroUsize::MIN,
        }
    }

    /// Returns the webhook connection settings.
    #[must_use]
    pub fn webhook_settings(&self) -> WebhookSettings {
        WebhookSettings {
            url: self.webhook.url.clone(),
            connect_timeout: Duration::from_millis(self.webhook.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.webhook.request_timeout_ms),
        }
    }
}
