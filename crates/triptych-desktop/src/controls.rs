//! Input handling for the desktop player

use triptych_core::PointerEvent;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::keyboard::{Key, NamedKey};

/// What a window event asks the app to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    Pointer(PointerEvent),
    Quit,
}

/// Tracks the cursor so button presses get a position
#[derive(Debug, Default)]
pub struct InputState {
    cursor: (f64, f64),
    touch: Option<u64>,
}

impl InputState {
    /// Translate a window event. Mouse and a single touch point both map to
    /// pointer samples; extra fingers are ignored.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<ControlAction> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
                let (x, y) = self.cursor;
                Some(ControlAction::Pointer(PointerEvent::Move { x, y }))
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.cursor;
                Some(ControlAction::Pointer(match state {
                    ElementState::Pressed => PointerEvent::Down { x, y },
                    ElementState::Released => PointerEvent::Up { x, y },
                }))
            }
            WindowEvent::Touch(touch) => {
                match (self.touch, touch.phase) {
                    (None, TouchPhase::Started) => self.touch = Some(touch.id),
                    (Some(id), _) if id == touch.id => {}
                    _ => return None,
                }
                if matches!(touch.phase, TouchPhase::Ended | TouchPhase::Cancelled) {
                    self.touch = None;
                }
                Some(ControlAction::Pointer(touch_to_pointer(
                    touch.phase,
                    touch.location.x,
                    touch.location.y,
                )))
            }
            WindowEvent::Focused(false) => {
                self.touch = None;
                Some(ControlAction::Pointer(PointerEvent::Cancel))
            }
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                Some(ControlAction::Quit)
            }
            _ => None,
        }
    }
}

/// Map a touch phase to a pointer sample
pub fn touch_to_pointer(phase: TouchPhase, x: f64, y: f64) -> PointerEvent {
    match phase {
        TouchPhase::Started => PointerEvent::Down { x, y },
        TouchPhase::Moved => PointerEvent::Move { x, y },
        TouchPhase::Ended => PointerEvent::Up { x, y },
        TouchPhase::Cancelled => PointerEvent::Cancel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_phases() {
        assert_eq!(
            touch_to_pointer(TouchPhase::Started, 1.0, 2.0),
            PointerEvent::Down { x: 1.0, y: 2.0 }
        );
        assert_eq!(
            touch_to_pointer(TouchPhase::Moved, 3.0, 2.0),
            PointerEvent::Move { x: 3.0, y: 2.0 }
        );
        assert_eq!(
            touch_to_pointer(TouchPhase::Ended, 3.0, 2.0),
            PointerEvent::Up { x: 3.0, y: 2.0 }
        );
        assert_eq!(
            touch_to_pointer(TouchPhase::Cancelled, 0.0, 0.0),
            PointerEvent::Cancel
        );
    }
}
