//! Pan/tap recognition from raw mouse events.
//!
//! [`PointerRecognizer`] turns `MouseDown`/`MouseMove`/`MouseUp` into the
//! gesture lifecycle the drag engine consumes: a pan that starts on the thumb
//! and reports incremental horizontal deltas, or a tap anywhere on the switch.

use crate::event::{Event, GesturePhase, MouseButton};
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Configuration for gesture recognition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Horizontal distance (in pixels) before a press on the thumb becomes a pan.
    pub pan_threshold: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { pan_threshold: 2.0 }
    }
}

/// A recognized switch gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwitchGesture {
    /// Pan lifecycle step
    Pan(GesturePhase),
    /// Press and release without a pan
    Tap,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    origin: Point,
    last_x: f32,
    on_thumb: bool,
    panning: bool,
}

/// Recognizes pans and taps for a single switch.
#[derive(Debug, Clone, Default)]
pub struct PointerRecognizer {
    config: GestureConfig,
    press: Option<Press>,
}

impl PointerRecognizer {
    /// Create a recognizer with default config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recognizer with custom config.
    #[must_use]
    pub const fn with_config(config: GestureConfig) -> Self {
        Self {
            config,
            press: None,
        }
    }

    /// Get the current gesture configuration.
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Whether the left button is held after a press on the switch.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Whether a pan is in progress.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.press.is_some_and(|p| p.panning)
    }

    /// Process an event against the switch and thumb rectangles.
    ///
    /// A single move may yield both `Began` and the first `Changed`.
    pub fn process(&mut self, event: &Event, bounds: Rect, thumb: Rect) -> Vec<SwitchGesture> {
        let mut out = Vec::new();
        match event {
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                if bounds.contains_point(position) {
                    self.press = Some(Press {
                        origin: *position,
                        last_x: position.x,
                        on_thumb: thumb.contains_point(position),
                        panning: false,
                    });
                }
            }
            Event::MouseMove { position } => {
                let threshold = self.config.pan_threshold;
                if let Some(press) = self.press.as_mut() {
                    if !press.panning
                        && press.on_thumb
                        && (position.x - press.origin.x).abs() >= threshold
                    {
                        press.panning = true;
                        trace!(x = position.x, "pan recognized");
                        out.push(SwitchGesture::Pan(GesturePhase::Began));
                    }
                    if press.panning {
                        let dx = position.x - press.last_x;
                        press.last_x = position.x;
                        out.push(SwitchGesture::Pan(GesturePhase::Changed(dx)));
                    }
                }
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => {
                if let Some(press) = self.press.take() {
                    if press.panning {
                        out.push(SwitchGesture::Pan(GesturePhase::Ended));
                    } else if bounds.contains_point(position) {
                        out.push(SwitchGesture::Tap);
                    }
                }
            }
            Event::FocusOut => out.extend(self.cancel()),
            _ => {}
        }
        out
    }

    /// Drop any press; a pan in progress is reported as cancelled.
    pub fn cancel(&mut self) -> Option<SwitchGesture> {
        self.press
            .take()
            .filter(|p| p.panning)
            .map(|_| SwitchGesture::Pan(GesturePhase::Cancelled))
    }
}
