//! Event bus configuration and validation
//!
//! # Example
//!
//! ```
//! use event_bus::{CompactionPolicy, EventBusConfig};
//!
//! let config = EventBusConfig::default()
//!     .with_compaction(CompactionPolicy::Eager)
//!     .with_expected_events(8);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::ConfigError;
use crate::{DEFAULT_TOMBSTONE_THRESHOLD, ENV_COMPACTION, ENV_EXPECTED_EVENTS};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// When tombstoned slots are reclaimed.
///
/// Compaction only ever runs while no fire pass is active on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompactionPolicy {
    /// Keep tombstones for the lifetime of the list.
    Never,
    /// Reclaim as soon as a list holds any tombstone.
    Eager,
    /// Reclaim once a list holds at least this many tombstones.
    Threshold(usize),
}

impl Default for CompactionPolicy {
    fn default() -> Self {
        Self::Threshold(DEFAULT_TOMBSTONE_THRESHOLD)
    }
}

impl fmt::Display for CompactionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => f.write_str("never"),
            Self::Eager => f.write_str("eager"),
            Self::Threshold(n) => write!(f, "threshold:{n}"),
        }
    }
}

impl FromStr for CompactionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "never" => Ok(Self::Never),
            "eager" => Ok(Self::Eager),
            other => {
                let Some(count) = other.strip_prefix("threshold:") else {
                    return Err(ConfigError::UnknownCompactionPolicy(s.to_string()));
                };
                let count = count.trim().parse::<usize>().map_err(|_| {
                    ConfigError::InvalidNumber {
                        key: ENV_COMPACTION.to_string(),
                        value: s.to_string(),
                    }
                })?;
                let policy = Self::Threshold(count);
                policy.validate()?;
                Ok(policy)
            }
        }
    }
}

impl CompactionPolicy {
    /// Reject a zero threshold, which would compact lists with no tombstones.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Threshold(0) => Err(ConfigError::InvalidCompactionThreshold),
            _ => Ok(()),
        }
    }
}

/// Event bus configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBusConfig {
    /// Tombstone reclamation policy
    pub compaction: CompactionPolicy,
    /// Event names to pre-size the registry for (0 = allocate lazily)
    pub expected_events: usize,
}

impl EventBusConfig {
    /// Create a new configuration with validation
    pub fn new(compaction: CompactionPolicy, expected_events: usize) -> Result<Self, ConfigError> {
        let config = Self {
            compaction,
            expected_events,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `EVENT_BUS_COMPACTION`: `never`, `eager` or `threshold:N` (default: threshold:16)
    /// - `EVENT_BUS_EXPECTED_EVENTS`: registry pre-size (default: 0)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(policy) = lookup(ENV_COMPACTION) {
            config.compaction = policy.parse()?;
        }

        if let Some(value) = lookup(ENV_EXPECTED_EVENTS) {
            config.expected_events = match value.trim().parse() {
                Ok(count) => count,
                Err(_) => {
                    return Err(ConfigError::InvalidNumber {
                        key: ENV_EXPECTED_EVENTS.to_string(),
                        value,
                    })
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.compaction.validate()
    }

    /// Builder-style method to set the compaction policy
    #[must_use]
    pub fn with_compaction(mut self, compaction: CompactionPolicy) -> Self {
        self.compaction = compaction;
        self
    }

    /// Builder-style method to set the registry pre-size
    #[must_use]
    pub fn with_expected_events(mut self, expected_events: usize) -> Self {
        self.expected_events = expected_events;
        self
    }
}
