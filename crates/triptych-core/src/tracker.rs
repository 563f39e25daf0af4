//! Per-pane playback error tracking

use crate::types::{PaneId, PlaybackError, PlayerEvent, PlayerState};
use tracing::{info, warn};

/// Error state of one pane
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrackerState {
    #[default]
    Nominal,
    /// The player reported an error; holds the most recent one
    Errored(PlaybackError),
}

/// Turns a pane's player events into a single error flag.
///
/// Any error moves the pane to `Errored`. Only a transition to
/// [`PlayerState::Ready`] clears it; buffering, idle and end-of-stream
/// leave the flag alone.
#[derive(Debug, Clone)]
pub struct PlaybackErrorTracker {
    pane: PaneId,
    state: TrackerState,
    error_count: u32,
}

impl PlaybackErrorTracker {
    pub fn new(pane: PaneId) -> Self {
        Self {
            pane,
            state: TrackerState::Nominal,
            error_count: 0,
        }
    }

    /// Feed one player event. Returns true if the error flag flipped.
    pub fn handle_event(&mut self, event: &PlayerEvent) -> bool {
        let was_errored = self.has_error();

        match event {
            PlayerEvent::Error(error) => {
                self.error_count += 1;
                warn!(
                    pane = %self.pane,
                    kind = %error.kind,
                    message = %error.message,
                    count = self.error_count,
                    "Playback error"
                );
                self.state = TrackerState::Errored(error.clone());
            }
            PlayerEvent::StateChanged(PlayerState::Ready) => {
                if was_errored {
                    info!(pane = %self.pane, "Playback recovered");
                }
                self.state = TrackerState::Nominal;
            }
            PlayerEvent::StateChanged(_) => {}
        }

        was_errored != self.has_error()
    }

    pub fn has_error(&self) -> bool {
        matches!(self.state, TrackerState::Errored(_))
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Most recent error, while the pane is errored
    pub fn last_error(&self) -> Option<&PlaybackError> {
        match &self.state {
            TrackerState::Errored(error) => Some(error),
            TrackerState::Nominal => None,
        }
    }

    /// Errors seen over the lifetime of the pane
    pub fn error_count(&self) -> u32 {
        self.error_count
    }
}
