//! Error types for Triptych Core

use crate::types::PaneId;
use thiserror::Error;

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, Error>;

/// Session error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid pane index: {0} (expected 0..3)")]
    InvalidPane(usize),

    #[error("Invalid stream source {uri:?}: {reason}")]
    InvalidSource { uri: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Player failure on pane {pane}: {message}")]
    Player { pane: PaneId, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a player error for a pane
    pub fn player(pane: PaneId, message: impl Into<String>) -> Self {
        Error::Player {
            pane,
            message: message.into(),
        }
    }

    /// Returns true if the session can keep running after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Player { .. })
    }

    /// Short machine-readable code, used as a log field
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidPane(_) => "INVALID_PANE",
            Error::InvalidSource { .. } => "INVALID_SOURCE",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Player { .. } => "PLAYER",
            Error::Internal(_) => "INTERNAL",
        }
    }
}
