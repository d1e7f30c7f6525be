//! Canvas implementations for rendering.

use crate::widget::Canvas;
use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// A recorded drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Filled rectangle with uniform corner radius
    RoundedRect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius
        radius: f32,
        /// Fill color
        color: Color,
    },
    /// Filled circle
    Circle {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Fill color
        color: Color,
    },
    /// Stroked circle
    CircleOutline {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Stroke color
        color: Color,
        /// Stroke width
        width: f32,
    },
}

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// Useful for testing what a widget painted.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Clear all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.commands.push(DrawCommand::RoundedRect {
            bounds: rect,
            radius,
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, color: Color, width: f32) {
        self.commands.push(DrawCommand::CircleOutline {
            center,
            radius,
            color,
            width,
        });
    }
}
