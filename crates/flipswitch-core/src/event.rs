//! Input events and gesture phases.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types delivered by the host toolkit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Mouse moved to position
    MouseMove {
        /// New position
        position: Point,
    },
    /// Mouse button pressed
    MouseDown {
        /// Position of click
        position: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Mouse button released
    MouseUp {
        /// Position of release
        position: Point,
        /// Button released
        button: MouseButton,
    },
    /// Widget lost focus
    FocusOut,
    /// Mouse left widget bounds
    MouseLeave,
    /// Window resized
    Resize {
        /// New width
        width: f32,
        /// New height
        height: f32,
    },
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Phase of a continuous drag gesture, as fed into the drag engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GesturePhase {
    /// Drag started
    Began,
    /// Drag moved by an incremental horizontal delta since the previous event
    Changed(f32),
    /// Drag finished normally
    Ended,
    /// Drag abandoned by the host before it could end
    Cancelled,
}

impl GesturePhase {
    /// Whether this phase terminates a drag session.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_mouse_button() {
        let e = Event::MouseDown {
            position: Point::new(5.0, 5.0),
            button: MouseButton::Left,
        };
        if let Event::MouseDown { button, .. } = e {
            assert_eq!(button, MouseButton::Left);
        } else {
            panic!("Expected MouseDown event");
        }
    }

    #[test]
    fn test_gesture_phase_is_terminal() {
        assert!(!GesturePhase::Began.is_terminal());
        assert!(!GesturePhase::Changed(3.0).is_terminal());
        assert!(GesturePhase::Ended.is_terminal());
        assert!(GesturePhase::Cancelled.is_terminal());
    }

    #[test]
    fn test_event_serde_roundtrip() {
        let e = Event::MouseUp {
            position: Point::new(1.0, 2.0),
            button: MouseButton::Right,
        };
        let json = serde_json::to_string(&e).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}
