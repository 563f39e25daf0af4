//! Triptych Session - owns the three panes for one UI session
//!
//! Coordinates:
//! - Player acquisition, startup and release
//! - Pointer gestures to weight updates
//! - Weight animation and pane layout
//! - Player events to per-pane error flags

use crate::{
    animation::WeightAnimator,
    config::SessionConfig,
    gesture::{GestureEvent, GestureRecognizer, PointerEvent},
    layout::{PaneLayout, Rect},
    player::{MediaPlayer, PlayerSet},
    tracker::PlaybackErrorTracker,
    types::*,
    weights::{WeightBounds, WeightDistributor},
    Result,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// One of the three display regions
#[derive(Debug, Clone)]
pub struct Pane {
    id: PaneId,
    source: Url,
    tracker: PlaybackErrorTracker,
}

impl Pane {
    fn new(id: PaneId, source: Url) -> Self {
        Self {
            id,
            source,
            tracker: PlaybackErrorTracker::new(id),
        }
    }

    pub fn id(&self) -> PaneId {
        self.id
    }

    pub fn source(&self) -> &Url {
        &self.source
    }

    pub fn has_error(&self) -> bool {
        self.tracker.has_error()
    }

    pub fn tracker(&self) -> &PlaybackErrorTracker {
        &self.tracker
    }
}

/// What a frame tick produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Video rectangle per pane
    pub rects: [Rect; PANE_COUNT],
    /// Whether another frame is needed to finish the animation
    pub animating: bool,
}

/// How far a pane's player got through startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Startup {
    Pending,
    Sourced,
    Prepared,
}

/// A three-pane playback session
pub struct TriptychSession<P: MediaPlayer> {
    id: SessionId,
    config: SessionConfig,
    panes: [Pane; PANE_COUNT],
    weights: WeightDistributor,
    animator: WeightAnimator,
    layout: PaneLayout,
    gestures: GestureRecognizer,
    players: PlayerSet<P>,
    startup: [Startup; PANE_COUNT],
}

impl<P: MediaPlayer> TriptychSession<P> {
    /// Validate `config` and acquire one player per pane
    pub fn new(
        config: SessionConfig,
        width: u32,
        height: u32,
        factory: impl FnMut(PaneId) -> Result<P>,
    ) -> Result<Self> {
        config.validate()?;

        let [a, b, c] = config.source_urls()?;
        let panes = [
            Pane::new(PaneId::FIRST, a),
            Pane::new(PaneId::SECOND, b),
            Pane::new(PaneId::THIRD, c),
        ];

        let bounds = WeightBounds::new(config.min_weight, config.max_weight)?;
        let weights = WeightDistributor::new(config.initial_weights, bounds)?;
        let animator = WeightAnimator::new(
            config.initial_weights,
            config.spring_stiffness,
            config.visibility_threshold,
        );
        let layout = PaneLayout::new(width, height, config.pane_gap);
        let gestures = GestureRecognizer::new(config.drag_slop);

        let players = PlayerSet::acquire(factory)?;

        let id = SessionId::new();
        info!(session_id = %id, width, height, "Session created");

        Ok(Self {
            id,
            config,
            panes,
            weights,
            animator,
            layout,
            gestures,
            players,
            startup: [Startup::Pending; PANE_COUNT],
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn pane(&self, pane: PaneId) -> &Pane {
        &self.panes[pane.index()]
    }

    pub fn panes(&self) -> &[Pane; PANE_COUNT] {
        &self.panes
    }

    /// Target weight of a pane
    pub fn weight(&self, pane: PaneId) -> f32 {
        self.weights.weight(pane)
    }

    pub fn weights(&self) -> &WeightDistributor {
        &self.weights
    }

    /// Weights as currently drawn (mid-animation values)
    pub fn displayed_weights(&self) -> [f32; PANE_COUNT] {
        self.animator.current()
    }

    pub fn player(&self, pane: PaneId) -> &P {
        self.players.get(pane)
    }

    pub fn player_mut(&mut self, pane: PaneId) -> &mut P {
        self.players.get_mut(pane)
    }

    pub fn is_released(&self) -> bool {
        self.players.is_released()
    }

    /// True once every pane's player has been prepared
    pub fn is_started(&self) -> bool {
        self.startup.iter().all(|s| *s == Startup::Prepared)
    }

    /// Assign each pane's source, configure and prepare its player.
    ///
    /// If a player fails, calling again resumes at that player: a source is
    /// assigned at most once and already prepared players are left alone.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn start(&mut self) -> Result<()> {
        if self.is_started() {
            warn!("Session already started");
            return Ok(());
        }
        if self.players.is_released() {
            return Err(crate::Error::Internal("session already released".into()));
        }

        let auto_play = self.config.auto_play;
        let looping = self.config.looping;
        for (pane, player) in self.players.iter_mut() {
            let stage = &mut self.startup[pane.index()];
            let source = &self.panes[pane.index()].source;
            if *stage == Startup::Pending {
                player.set_source(source)?;
                player.set_looping(looping);
                player.set_auto_play(auto_play);
                *stage = Startup::Sourced;
            }
            if *stage == Startup::Sourced {
                player.prepare()?;
                *stage = Startup::Prepared;
                info!(pane = %pane, source = %source, "Player prepared");
            }
        }
        Ok(())
    }

    /// Route a player event to its pane. Returns true if the pane's error
    /// flag changed.
    pub fn handle_player_event(&mut self, pane: PaneId, event: &PlayerEvent) -> bool {
        debug!(pane = %pane, event = ?event, "Player event");
        self.panes[pane.index()].tracker.handle_event(event)
    }

    /// Drain every event queued on a channel. Returns the panes whose error
    /// flag changed.
    pub fn drain_events(
        &mut self,
        rx: &mut mpsc::UnboundedReceiver<(PaneId, PlayerEvent)>,
    ) -> Vec<PaneId> {
        let mut changed = Vec::new();
        while let Ok((pane, event)) = rx.try_recv() {
            if self.handle_player_event(pane, &event) && !changed.contains(&pane) {
                changed.push(pane);
            }
        }
        changed
    }

    /// Feed one pointer sample; applies any resulting drag or tap.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<GestureEvent> {
        let layout = self.layout;
        let displayed = self.animator.current();
        let gesture = self
            .gestures
            .process(event, |x, y| layout.pane_at(displayed, x, y))?;
        self.apply_gesture(gesture);
        Some(gesture)
    }

    /// Apply a recognized gesture to the target weights.
    ///
    /// Drag distance is divided by the current width of the dragged pane.
    pub fn apply_gesture(&mut self, gesture: GestureEvent) {
        match gesture {
            GestureEvent::Drag { pane, dx } => {
                let width = self.layout.compute(self.animator.current())[pane.index()].width;
                if width <= 0 {
                    debug!(pane = %pane, "Ignoring drag on collapsed pane");
                    return;
                }
                self.weights.apply_drag(pane, (dx / width as f64) as f32);
            }
            GestureEvent::Tap { pane } => {
                self.weights.apply_maximize(pane);
            }
        }
    }

    /// Window size changed
    pub fn resize(&mut self, width: u32, height: u32) {
        debug!(width, height, "Layout resized");
        self.layout.resize(width, height);
    }

    /// Advance the animation by `dt` and lay out the panes
    pub fn tick(&mut self, dt: Duration) -> Frame {
        let animating = self.animator.step(self.weights.weights(), dt);
        Frame {
            rects: self.layout.compute(self.animator.current()),
            animating,
        }
    }

    /// Current pane rectangles without advancing the animation
    pub fn rects(&self) -> [Rect; PANE_COUNT] {
        self.layout.compute(self.animator.current())
    }

    /// Release all players. Safe to call more than once; dropping the
    /// session releases them too.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn release(&mut self) {
        self.players.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct NullPlayer;

    impl MediaPlayer for NullPlayer {
        fn set_source(&mut self, _uri: &Url) -> Result<()> {
            Ok(())
        }
        fn prepare(&mut self) -> Result<()> {
            Ok(())
        }
        fn set_auto_play(&mut self, _auto_play: bool) {}
        fn set_looping(&mut self, _enabled: bool) {}
        fn release(&mut self) {}
    }

    fn session() -> TriptychSession<NullPlayer> {
        TriptychSession::new(SessionConfig::default(), 1000, 500, |_| Ok(NullPlayer)).unwrap()
    }

    #[test]
    fn test_session_creation() {
        let session = session();
        assert_eq!(session.weights().weights(), [0.7, 0.2, 0.1]);
        assert_eq!(session.displayed_weights(), [0.7, 0.2, 0.1]);
        assert!(session.panes().iter().all(|p| !p.has_error()));
        assert_eq!(session.pane(PaneId::SECOND).id(), PaneId::SECOND);
    }

    #[test]
    fn test_tap_maximizes() {
        let mut session = session();
        session.handle_pointer(PointerEvent::Down { x: 950.0, y: 100.0 });
        let gesture = session.handle_pointer(PointerEvent::Up { x: 950.0, y: 100.0 });

        assert_eq!(gesture, Some(GestureEvent::Tap { pane: PaneId::THIRD }));
        assert_eq!(session.weights().weights(), [0.1, 0.1, 0.8]);
    }

    #[test]
    fn test_drag_is_scaled_by_pane_width() {
        let mut session = session();
        // The middle pane is 188 px wide at the default weights
        session.apply_gesture(GestureEvent::Drag {
            pane: PaneId::SECOND,
            dx: 18.8,
        });
        let [a, b, c] = session.weights().weights();
        assert!((a - 0.65).abs() < 1e-4);
        assert!((b - 0.3).abs() < 1e-4);
        assert!((c - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_tick_animates_toward_targets() {
        let mut session = session();
        session.apply_gesture(GestureEvent::Tap { pane: PaneId::SECOND });

        let frame = session.tick(Duration::from_millis(16));
        assert!(frame.animating);
        let shown = session.displayed_weights();
        assert!(shown[1] > 0.2 && shown[1] < 0.8);

        let frame = session.tick(Duration::from_secs(5));
        assert!(!frame.animating);
        assert_eq!(session.displayed_weights(), [0.1, 0.8, 0.1]);
    }

    #[test]
    fn test_resize_changes_rects() {
        let mut session = session();
        session.resize(2000, 300);
        let rects = session.rects();
        assert_eq!(rects[0].width, 1400);
        assert_eq!(rects[2].x + rects[2].width, 2000);
        assert_eq!(rects[0].height, 300);
    }

    #[test]
    fn test_invalid_config_acquires_nothing() {
        let config = SessionConfig {
            min_weight: 0.0,
            ..Default::default()
        };
        let mut calls = 0;
        let result = TriptychSession::new(config, 100, 100, |_| {
            calls += 1;
            Ok(NullPlayer)
        });
        assert!(result.is_err());
        assert_eq!(calls, 0);
    }
}
