//! External media player contract
//!
//! The session drives three players through [`MediaPlayer`] and receives
//! their callbacks through a [`PlayerEventSink`]. Players are acquired and
//! released together by [`PlayerSet`].

use crate::{
    types::{PaneId, PlayerEvent, PANE_COUNT},
    Error, Result,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use url::Url;

/// Narrow interface to a host media player
pub trait MediaPlayer {
    /// Assign the stream to play
    fn set_source(&mut self, uri: &Url) -> Result<()>;

    /// Start loading the assigned source
    fn prepare(&mut self) -> Result<()>;

    /// Play as soon as prepared
    fn set_auto_play(&mut self, auto_play: bool);

    /// Restart from the beginning at end of stream
    fn set_looping(&mut self, enabled: bool);

    /// Free the player; called exactly once by [`PlayerSet`]
    fn release(&mut self);
}

/// Receiver side for player callbacks.
///
/// Players call this from their own threads; implementations forward the
/// event to the UI loop.
pub trait PlayerEventSink: Clone + Send + 'static {
    fn emit(&self, pane: PaneId, event: PlayerEvent);
}

impl PlayerEventSink for mpsc::UnboundedSender<(PaneId, PlayerEvent)> {
    fn emit(&self, pane: PaneId, event: PlayerEvent) {
        if self.send((pane, event)).is_err() {
            debug!(pane = %pane, "Event receiver dropped");
        }
    }
}

/// The three players of a session, released together exactly once
pub struct PlayerSet<P: MediaPlayer> {
    players: [P; PANE_COUNT],
    released: bool,
}

impl<P: MediaPlayer> PlayerSet<P> {
    /// Create one player per pane, left to right.
    ///
    /// If a later player fails to construct, the ones already created are
    /// released before the error is returned.
    pub fn acquire(mut factory: impl FnMut(PaneId) -> Result<P>) -> Result<Self> {
        let mut created: Vec<P> = Vec::with_capacity(PANE_COUNT);
        for pane in PaneId::ALL {
            match factory(pane) {
                Ok(player) => created.push(player),
                Err(e) => {
                    warn!(pane = %pane, error = %e, "Player construction failed");
                    for player in created.iter_mut() {
                        player.release();
                    }
                    return Err(e);
                }
            }
        }

        let players: [P; PANE_COUNT] = created
            .try_into()
            .map_err(|_| Error::Internal("player count mismatch".into()))?;

        info!("Acquired {} players", PANE_COUNT);
        Ok(Self {
            players,
            released: false,
        })
    }

    pub fn get(&self, pane: PaneId) -> &P {
        &self.players[pane.index()]
    }

    pub fn get_mut(&mut self, pane: PaneId) -> &mut P {
        &mut self.players[pane.index()]
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PaneId, &mut P)> {
        PaneId::ALL.into_iter().zip(self.players.iter_mut())
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Release all three players. Later calls do nothing.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        for (pane, player) in PaneId::ALL.into_iter().zip(self.players.iter_mut()) {
            debug!(pane = %pane, "Releasing player");
            player.release();
        }
        info!("Released {} players", PANE_COUNT);
    }
}

impl<P: MediaPlayer> Drop for PlayerSet<P> {
    fn drop(&mut self) {
        self.release();
    }
}
