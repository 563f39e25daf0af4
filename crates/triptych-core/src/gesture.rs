//! Gesture recognition: raw pointer samples to pane drags and taps.
//!
//! # Invariants
//!
//! 1. A press that starts a drag never also produces a tap.
//! 2. A drag stays bound to the pane it started in, even when the pointer
//!    leaves that pane.
//! 3. Only horizontal travel counts toward the drag slop.
//! 4. After [`PointerEvent::Cancel`] the recognizer is idle.

use crate::types::PaneId;

/// Raw pointer input in window coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Cancel,
}

/// Recognized gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Horizontal drag sample on `pane`, in pixels
    Drag { pane: PaneId, dx: f64 },
    /// Press and release on `pane` without dragging
    Tap { pane: PaneId },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Pressed { pane: PaneId, origin_x: f64 },
    Dragging { pane: PaneId, last_x: f64 },
}

/// Stateful pointer-to-gesture processor
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    slop: f64,
    phase: Phase,
}

impl GestureRecognizer {
    pub fn new(slop: f32) -> Self {
        Self {
            slop: slop.max(0.0) as f64,
            phase: Phase::Idle,
        }
    }

    /// Feed one pointer sample.
    ///
    /// `hit` resolves a position to the pane under it. It is consulted on
    /// `Down` to pick the pane and on `Up` to confirm a tap lands on it.
    pub fn process(
        &mut self,
        event: PointerEvent,
        hit: impl FnOnce(f64, f64) -> Option<PaneId>,
    ) -> Option<GestureEvent> {
        match (self.phase, event) {
            (_, PointerEvent::Down { x, y }) => {
                self.phase = match hit(x, y) {
                    Some(pane) => Phase::Pressed { pane, origin_x: x },
                    None => Phase::Idle,
                };
                None
            }
            (Phase::Pressed { pane, origin_x }, PointerEvent::Move { x, .. }) => {
                let travel = x - origin_x;
                if travel.abs() <= self.slop {
                    return None;
                }
                self.phase = Phase::Dragging { pane, last_x: x };
                let overshoot = travel - self.slop.copysign(travel);
                Some(GestureEvent::Drag { pane, dx: overshoot })
            }
            (Phase::Dragging { pane, last_x }, PointerEvent::Move { x, .. }) => {
                self.phase = Phase::Dragging { pane, last_x: x };
                let dx = x - last_x;
                (dx != 0.0).then_some(GestureEvent::Drag { pane, dx })
            }
            (Phase::Pressed { pane, .. }, PointerEvent::Up { x, y }) => {
                self.phase = Phase::Idle;
                (hit(x, y) == Some(pane)).then_some(GestureEvent::Tap { pane })
            }
            (_, PointerEvent::Up { .. }) | (_, PointerEvent::Cancel) => {
                self.phase = Phase::Idle;
                None
            }
            (Phase::Idle, PointerEvent::Move { .. }) => None,
        }
    }

    /// True between a press and its release/cancel
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_first(_: f64, _: f64) -> Option<PaneId> {
        Some(PaneId::FIRST)
    }

    fn nowhere(_: f64, _: f64) -> Option<PaneId> {
        None
    }

    #[test]
    fn test_tap() {
        let mut g = GestureRecognizer::new(8.0);
        assert_eq!(g.process(PointerEvent::Down { x: 10.0, y: 10.0 }, on_first), None);
        assert_eq!(g.process(PointerEvent::Move { x: 14.0, y: 30.0 }, on_first), None);
        assert_eq!(
            g.process(PointerEvent::Up { x: 14.0, y: 30.0 }, on_first),
            Some(GestureEvent::Tap { pane: PaneId::FIRST })
        );
        assert!(!g.is_active());
    }

    #[test]
    fn test_release_off_pane_is_not_a_tap() {
        let mut g = GestureRecognizer::new(8.0);
        g.process(PointerEvent::Down { x: 10.0, y: 10.0 }, on_first);
        // Vertical travel does not start a drag, but the release is off the pane
        assert_eq!(g.process(PointerEvent::Move { x: 12.0, y: 900.0 }, on_first), None);
        assert_eq!(g.process(PointerEvent::Up { x: 12.0, y: 900.0 }, nowhere), None);
        assert!(!g.is_active());

        g.process(PointerEvent::Down { x: 10.0, y: 10.0 }, on_first);
        let released_on_other = g.process(PointerEvent::Up { x: 12.0, y: 10.0 }, |_, _| {
            Some(PaneId::SECOND)
        });
        assert_eq!(released_on_other, None);
    }

    #[test]
    fn test_drag_reports_overshoot_then_increments() {
        let mut g = GestureRecognizer::new(8.0);
        g.process(PointerEvent::Down { x: 100.0, y: 0.0 }, on_first);

        assert_eq!(
            g.process(PointerEvent::Move { x: 112.0, y: 0.0 }, on_first),
            Some(GestureEvent::Drag { pane: PaneId::FIRST, dx: 4.0 })
        );
        assert_eq!(
            g.process(PointerEvent::Move { x: 102.0, y: 0.0 }, on_first),
            Some(GestureEvent::Drag { pane: PaneId::FIRST, dx: -10.0 })
        );
        assert!(g.is_dragging());
    }

    #[test]
    fn test_leftward_drag_overshoot() {
        let mut g = GestureRecognizer::new(8.0);
        g.process(PointerEvent::Down { x: 100.0, y: 0.0 }, on_first);
        assert_eq!(
            g.process(PointerEvent::Move { x: 90.0, y: 0.0 }, on_first),
            Some(GestureEvent::Drag { pane: PaneId::FIRST, dx: -2.0 })
        );
    }

    #[test]
    fn test_drag_never_taps() {
        let mut g = GestureRecognizer::new(8.0);
        g.process(PointerEvent::Down { x: 0.0, y: 0.0 }, on_first);
        g.process(PointerEvent::Move { x: 50.0, y: 0.0 }, on_first);
        assert_eq!(g.process(PointerEvent::Up { x: 50.0, y: 0.0 }, on_first), None);
        assert!(!g.is_active());
    }

    #[test]
    fn test_drag_stays_on_origin_pane() {
        let mut g = GestureRecognizer::new(0.0);
        g.process(PointerEvent::Down { x: 0.0, y: 0.0 }, |_, _| Some(PaneId::THIRD));
        let event = g.process(PointerEvent::Move { x: -300.0, y: 0.0 }, on_first);
        assert_eq!(event, Some(GestureEvent::Drag { pane: PaneId::THIRD, dx: -300.0 }));
    }

    #[test]
    fn test_press_outside_panes_is_ignored() {
        let mut g = GestureRecognizer::new(8.0);
        g.process(PointerEvent::Down { x: 703.0, y: 0.0 }, nowhere);
        assert!(!g.is_active());
        assert_eq!(g.process(PointerEvent::Move { x: 800.0, y: 0.0 }, nowhere), None);
        assert_eq!(g.process(PointerEvent::Up { x: 800.0, y: 0.0 }, nowhere), None);
    }

    #[test]
    fn test_cancel_drops_gesture() {
        let mut g = GestureRecognizer::new(8.0);
        g.process(PointerEvent::Down { x: 0.0, y: 0.0 }, on_first);
        g.process(PointerEvent::Cancel, on_first);
        assert_eq!(g.process(PointerEvent::Up { x: 0.0, y: 0.0 }, on_first), None);
    }

    #[test]
    fn test_vertical_motion_does_not_start_drag() {
        let mut g = GestureRecognizer::new(8.0);
        g.process(PointerEvent::Down { x: 0.0, y: 0.0 }, on_first);
        assert_eq!(g.process(PointerEvent::Move { x: 3.0, y: 200.0 }, on_first), None);
        assert!(!g.is_dragging());
    }
}
