//! Switch manifest schema.

use crate::error::ParseError;
use flipswitch_core::{
    Color, DragConfig, Easing, SwitchTheme, TrackGeometry, DEFAULT_ANIMATION_DURATION,
    DEFAULT_DRAG_VELOCITY_GAIN,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// A set of declared switches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SwitchManifest {
    /// Declared switches, in order
    #[serde(default)]
    pub switches: Vec<SwitchEntry>,
}

/// One declared switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchEntry {
    /// Identifier the application uses to tell switches apart
    pub id: String,
    /// Initial state
    #[serde(default)]
    pub on: bool,
    /// Total width
    #[serde(default = "default_width")]
    pub width: f32,
    /// Total height, which is also the thumb diameter
    #[serde(default = "default_height")]
    pub height: f32,
    /// Drag velocity gain
    #[serde(default = "default_gain")]
    pub drag_velocity_gain: f32,
    /// Settle animation duration in seconds
    #[serde(default = "default_duration")]
    pub animation_duration: f64,
    /// Settle easing
    #[serde(default)]
    pub easing: Easing,
    /// Color overrides as hex strings
    #[serde(default)]
    pub colors: ColorOverrides,
}

/// Optional hex color overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorOverrides {
    /// Track color when on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<String>,
    /// Track color when off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off: Option<String>,
    /// Thumb fill
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<String>,
}

const fn default_width() -> f32 {
    52.0
}

const fn default_height() -> f32 {
    32.0
}

const fn default_gain() -> f32 {
    DEFAULT_DRAG_VELOCITY_GAIN
}

const fn default_duration() -> f64 {
    DEFAULT_ANIMATION_DURATION
}

impl SwitchManifest {
    /// Parse and validate a manifest from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        let manifest: Self = serde_yaml_ng::from_str(yaml)?;
        manifest.validate()?;
        debug!(switches = manifest.switches.len(), "manifest loaded");
        Ok(manifest)
    }

    /// Serialize manifest to YAML string.
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check every entry and that ids are unique.
    pub fn validate(&self) -> Result<(), ParseError> {
        let mut seen = HashSet::new();
        for entry in &self.switches {
            entry.validate()?;
            if !seen.insert(entry.id.as_str()) {
                return Err(ParseError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(())
    }

    /// Look up a switch by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SwitchEntry> {
        self.switches.iter().find(|s| s.id == id)
    }
}

impl SwitchEntry {
    /// Create an entry with default geometry and tuning.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            on: false,
            width: default_width(),
            height: default_height(),
            drag_velocity_gain: default_gain(),
            animation_duration: default_duration(),
            easing: Easing::default(),
            colors: ColorOverrides::default(),
        }
    }

    /// Check the entry's values.
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.id.trim().is_empty() {
            return Err(ParseError::invalid("id", "must not be empty"));
        }
        let field = |name: &str| format!("{}.{name}", self.id);

        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ParseError::invalid(field("height"), "must be positive"));
        }
        if !(self.width.is_finite() && self.width > self.height) {
            return Err(ParseError::invalid(
                field("width"),
                "must be greater than height",
            ));
        }
        if !(self.drag_velocity_gain.is_finite() && self.drag_velocity_gain > 0.0) {
            return Err(ParseError::invalid(
                field("drag_velocity_gain"),
                "must be positive",
            ));
        }
        if !(self.animation_duration.is_finite() && self.animation_duration >= 0.0) {
            return Err(ParseError::invalid(
                field("animation_duration"),
                "must not be negative",
            ));
        }
        self.theme().map(|_| ())
    }

    /// Engine configuration for this entry.
    #[must_use]
    pub fn drag_config(&self) -> DragConfig {
        DragConfig::default()
            .geometry(TrackGeometry::from_extent(self.width, self.height))
            .drag_velocity_gain(self.drag_velocity_gain)
            .animation_duration(self.animation_duration)
            .easing(self.easing)
            .initial_on(self.on)
    }

    /// Theme with color overrides applied over the defaults.
    pub fn theme(&self) -> Result<SwitchTheme, ParseError> {
        let mut theme = SwitchTheme::default();
        let parse = |name: &str, hex: Option<&str>, slot: &mut Color| {
            if let Some(hex) = hex {
                *slot = Color::from_hex(hex).map_err(|source| ParseError::Color {
                    field: format!("{}.colors.{name}", self.id),
                    source,
                })?;
            }
            Ok::<(), ParseError>(())
        };
        parse("on", self.colors.on.as_deref(), &mut theme.on_color)?;
        parse("off", self.colors.off.as_deref(), &mut theme.off_color)?;
        parse("thumb", self.colors.thumb.as_deref(), &mut theme.thumb_color)?;
        Ok(theme)
    }
}
