//! Error types for the event bus

use crate::handler::HandlerError;
use thiserror::Error;

/// Errors surfaced by `EventBus::fire`.
#[derive(Debug, Error)]
pub enum BusError {
    /// A handler failed; the remaining handlers of that pass were skipped.
    #[error("Handler in slot {slot} of event '{event}' failed: {source}")]
    HandlerFailed {
        event: String,
        slot: usize,
        #[source]
        source: HandlerError,
    },
}

impl BusError {
    /// Name of the event whose pass was aborted.
    #[must_use]
    pub fn event(&self) -> &str {
        match self {
            Self::HandlerFailed { event, .. } => event,
        }
    }

    /// Consume the error and return the handler's own error.
    #[must_use]
    pub fn into_source(self) -> HandlerError {
        match self {
            Self::HandlerFailed { source, .. } => source,
        }
    }
}

/// Errors from configuration parsing and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Compaction threshold must be at least 1")]
    InvalidCompactionThreshold,

    #[error("Unknown compaction policy: {0:?} (expected never, eager or threshold:N)")]
    UnknownCompactionPolicy(String),

    #[error("Invalid number for {key}: {value:?}")]
    InvalidNumber { key: String, value: String },
}
