//! Error types for the designer crate.
//!
//! Snapping itself never fails (an unsnapped marker is reported through
//! `BridgeMarker::ok`); these errors cover construction, scene lookups and
//! toolpath file I/O.

use std::io;
use thiserror::Error;

use crate::items::ItemId;

/// Errors that can occur during designer operations.
#[derive(Error, Debug)]
pub enum DesignerError {
    /// A construction parameter is out of range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// No item with this id exists in the scene.
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DesignerError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        DesignerError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for designer operations.
pub type DesignerResult<T> = Result<T, DesignerError>;

impl From<DesignerError> for bridgecam_core::Error {
    fn from(err: DesignerError) -> Self {
        match err {
            DesignerError::Io(e) => bridgecam_core::Error::Io(e),
            other => bridgecam_core::Error::other(other.to_string()),
        }
    }
}
