//! Core types for Triptych

use crate::error::Error;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use uuid::Uuid;

/// Number of panes in the split layout
pub const PANE_COUNT: usize = 3;

/// Unique identifier for a UI session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one of the three panes.
///
/// Only `0`, `1` and `2` are representable, so weight and player arrays can
/// be indexed without bounds surprises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PaneId(u8);

impl PaneId {
    pub const FIRST: PaneId = PaneId(0);
    pub const SECOND: PaneId = PaneId(1);
    pub const THIRD: PaneId = PaneId(2);

    /// All panes, left to right
    pub const ALL: [PaneId; PANE_COUNT] = [Self::FIRST, Self::SECOND, Self::THIRD];

    /// Create a pane id, rejecting anything outside `0..3`
    pub fn new(index: usize) -> Option<Self> {
        (index < PANE_COUNT).then_some(PaneId(index as u8))
    }

    /// Array index of this pane
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The two other panes, in left-to-right order
    pub fn others(self) -> [PaneId; 2] {
        match self.0 {
            0 => [Self::SECOND, Self::THIRD],
            1 => [Self::FIRST, Self::THIRD],
            _ => [Self::FIRST, Self::SECOND],
        }
    }
}

impl TryFrom<usize> for PaneId {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        PaneId::new(index).ok_or(Error::InvalidPane(index))
    }
}

impl From<PaneId> for usize {
    fn from(pane: PaneId) -> usize {
        pane.index()
    }
}

impl std::fmt::Display for PaneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player state as reported by the external media player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerState {
    /// No media loaded, or stopped
    Idle,
    /// Waiting for data
    Buffering,
    /// Media is ready to play (playing or paused with data)
    Ready,
    /// End of stream reached
    Ended,
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerState::Idle => write!(f, "idle"),
            PlayerState::Buffering => write!(f, "buffering"),
            PlayerState::Ready => write!(f, "ready"),
            PlayerState::Ended => write!(f, "ended"),
        }
    }
}

/// Underlying cause of a playback error.
///
/// The UI collapses every kind into a single error flag; the kind is kept
/// for logs and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackErrorKind {
    /// Resource could not be opened or read
    Network,
    /// Manifest or container could not be parsed
    Manifest,
    /// Media could not be decoded
    Decode,
    /// Anything the player did not classify
    Other,
}

impl std::fmt::Display for PlaybackErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackErrorKind::Network => write!(f, "network"),
            PlaybackErrorKind::Manifest => write!(f, "manifest"),
            PlaybackErrorKind::Decode => write!(f, "decode"),
            PlaybackErrorKind::Other => write!(f, "other"),
        }
    }
}

/// Error reported by a pane's player
#[derive(ThisError, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind} error: {message}")]
pub struct PlaybackError {
    pub kind: PlaybackErrorKind,
    pub message: String,
}

impl PlaybackError {
    pub fn new(kind: PlaybackErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Event emitted by a player and routed to its pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    Error(PlaybackError),
    StateChanged(PlayerState),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pane_id_bounds() {
        assert_eq!(PaneId::new(0), Some(PaneId::FIRST));
        assert_eq!(PaneId::new(2), Some(PaneId::THIRD));
        assert_eq!(PaneId::new(3), None);
        assert!(matches!(PaneId::try_from(9), Err(Error::InvalidPane(9))));
    }

    #[test]
    fn test_pane_id_others() {
        assert_eq!(PaneId::FIRST.others(), [PaneId::SECOND, PaneId::THIRD]);
        assert_eq!(PaneId::SECOND.others(), [PaneId::FIRST, PaneId::THIRD]);
        assert_eq!(PaneId::THIRD.others(), [PaneId::FIRST, PaneId::SECOND]);
    }

    #[test]
    fn test_pane_id_serde_rejects_out_of_range() {
        let pane: PaneId = serde_json::from_str("1").unwrap();
        assert_eq!(pane, PaneId::SECOND);
        assert!(serde_json::from_str::<PaneId>("3").is_err());
    }

    #[test]
    fn test_playback_error_display() {
        let err = PlaybackError::new(PlaybackErrorKind::Network, "connection refused");
        assert_eq!(err.to_string(), "network error: connection refused");
    }
}
