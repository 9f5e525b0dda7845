//! Error handling for Pagewire
//!
//! Provides the error types shared by the event bus and the crates built on it:
//! - Event bus errors (handler failures, payload mismatches, dropped buses)
//! - Configuration errors (invalid or unreadable settings)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Event bus error type
///
/// Handlers report failures as `anyhow::Error`; the bus wraps them with the
/// name of the event that was being dispatched.
#[derive(Error, Debug)]
pub enum EventBusError {
    /// A handler failed and the dispatch policy is `Propagate`
    #[error("Handler for '{event}' failed: {source}")]
    Handler {
        /// Name of the event being dispatched.
        event: String,
        /// The error returned by the handler.
        #[source]
        source: anyhow::Error,
    },

    /// A JSON payload did not match the event's argument shape
    #[error("Invalid payload for '{event}': {source}")]
    Payload {
        /// Name of the event the payload was meant for.
        event: String,
        /// The underlying (de)serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The bus was dropped while a one-time event was still pending
    #[error("Event bus dropped before '{event}' completed")]
    BusDropped {
        /// Name of the one-time event.
        event: String,
    },
}

impl EventBusError {
    /// Name of the event this error relates to
    pub fn event(&self) -> &str {
        match self {
            EventBusError::Handler { event, .. }
            | EventBusError::Payload { event, .. }
            | EventBusError::BusDropped { event } => event,
        }
    }

    /// Check if this error came from a failing handler
    pub fn is_handler_error(&self) -> bool {
        matches!(self, EventBusError::Handler { .. })
    }
}

/// Main error type for Pagewire
///
/// A unified error type used by configuration loading and the facade crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Event bus error
    #[error(transparent)]
    EventBus(#[from] EventBusError),

    /// Invalid configuration value
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting {
        /// The offending setting key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Create an invalid-setting error
    pub fn invalid_setting(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is an event bus error
    pub fn is_event_bus_error(&self) -> bool {
        matches!(self, Error::EventBus(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
