//! Error handling for BridgeCAM
//!
//! Provides the unified error type shared by the workspace crates.
//! Crate-specific failures (designer geometry, settings) have their own
//! `thiserror` enums and convert into this one at crate boundaries.

use thiserror::Error;

use crate::event_bus::EventBusError;

/// Main error type for BridgeCAM
///
/// A unified error type that can represent any error from the core layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Event bus error
    #[error(transparent)]
    EventBus(#[from] EventBusError),

    /// Value could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

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

    /// Check if this is an event bus error
    pub fn is_event_bus_error(&self) -> bool {
        matches!(self, Error::EventBus(_))
    }

    /// Check if this is a parse error
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
