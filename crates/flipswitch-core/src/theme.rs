//! Switch colors as plain data.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Colors and outline used to paint a switch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwitchTheme {
    /// Track color when on
    pub on_color: Color,
    /// Track color when off
    pub off_color: Color,
    /// Thumb fill
    pub thumb_color: Color,
    /// Thin detail line along the thumb edge
    pub thumb_outline_color: Color,
    /// Width of the thumb outline
    pub thumb_outline_width: f32,
}

impl Default for SwitchTheme {
    fn default() -> Self {
        Self {
            on_color: Color::rgb8(19, 232, 89),
            off_color: Color::rgb8(203, 203, 203),
            thumb_color: Color::rgb8(226, 226, 226),
            thumb_outline_color: Color::BLACK,
            thumb_outline_width: 0.125,
        }
    }
}

impl SwitchTheme {
    /// Track color for the given state.
    #[must_use]
    pub const fn track_color(&self, on: bool) -> Color {
        if on {
            self.on_color
        } else {
            self.off_color
        }
    }
}
