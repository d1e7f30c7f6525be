//! Drag/toggle state engine for a two-position switch.
//!
//! [`ToggleDragEngine`] owns the thumb offset and the committed on/off state.
//! Hosts feed it gesture phases ([`GesturePhase`]), discrete activations and
//! programmatic sets; it answers through a [`SwitchSink`] with new thumb
//! positions, live (pre-commit) state changes, committed state changes and
//! transition requests.
//!
//! ```
//! use flipswitch_core::{DragConfig, SwitchOutput, ToggleDragEngine};
//!
//! let mut engine = ToggleDragEngine::new(DragConfig::new(100.0, 20.0));
//! let mut out = Vec::new();
//!
//! engine.on_activate(&mut out);
//! assert!(engine.is_on());
//! assert_eq!(engine.offset(), 100.0);
//! assert!(out.contains(&SwitchOutput::StateCommitted { on: true }));
//! ```

use crate::animation::Easing;
use crate::event::GesturePhase;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Default damping multiplier applied to raw drag deltas.
pub const DEFAULT_DRAG_VELOCITY_GAIN: f32 = 0.3;

/// Default settle animation duration in seconds.
pub const DEFAULT_ANIMATION_DURATION: f64 = 0.20;

// =============================================================================
// Configuration
// =============================================================================

/// Travel available to the thumb.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackGeometry {
    /// Track width minus thumb width, never negative
    pub track_length: f32,
    /// Width of the thumb
    pub thumb_width: f32,
}

impl TrackGeometry {
    /// Create geometry, clamping negative or non-finite extents to zero.
    #[must_use]
    pub fn new(track_length: f32, thumb_width: f32) -> Self {
        Self {
            track_length: non_negative(track_length),
            thumb_width: non_negative(thumb_width),
        }
    }

    /// Geometry of a round-thumb switch occupying `width` × `height`.
    ///
    /// The thumb diameter equals the height.
    #[must_use]
    pub fn from_extent(width: f32, height: f32) -> Self {
        Self::new(width - height, height)
    }

    /// Full width of the background the thumb slides over.
    #[must_use]
    pub fn background_width(&self) -> f32 {
        self.track_length + self.thumb_width
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Construction-time configuration of a [`ToggleDragEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Travel available to the thumb
    pub track_length: f32,
    /// Width of the thumb
    pub thumb_width: f32,
    /// Multiplier applied to each incremental drag delta
    pub drag_velocity_gain: f32,
    /// Settle animation duration in seconds
    pub animation_duration: f64,
    /// Easing handed to the transition player
    pub easing: Easing,
    /// State at construction
    pub initial_on: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            track_length: 0.0,
            thumb_width: 0.0,
            drag_velocity_gain: DEFAULT_DRAG_VELOCITY_GAIN,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            easing: Easing::EaseIn,
            initial_on: false,
        }
    }
}

impl DragConfig {
    /// Create a configuration for the given track with default tuning.
    #[must_use]
    pub fn new(track_length: f32, thumb_width: f32) -> Self {
        Self::default().geometry(TrackGeometry::new(track_length, thumb_width))
    }

    /// Set the track geometry.
    #[must_use]
    pub const fn geometry(mut self, geometry: TrackGeometry) -> Self {
        self.track_length = geometry.track_length;
        self.thumb_width = geometry.thumb_width;
        self
    }

    /// Set the drag velocity gain.
    #[must_use]
    pub const fn drag_velocity_gain(mut self, gain: f32) -> Self {
        self.drag_velocity_gain = gain;
        self
    }

    /// Set the settle animation duration in seconds.
    #[must_use]
    pub const fn animation_duration(mut self, seconds: f64) -> Self {
        self.animation_duration = seconds;
        self
    }

    /// Set the settle easing.
    #[must_use]
    pub const fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the initial state.
    #[must_use]
    pub const fn initial_on(mut self, on: bool) -> Self {
        self.initial_on = on;
        self
    }

    /// Current track geometry.
    #[must_use]
    pub const fn track_geometry(&self) -> TrackGeometry {
        TrackGeometry {
            track_length: self.track_length,
            thumb_width: self.thumb_width,
        }
    }

    /// Replace out-of-domain values with defaults.
    fn sanitized(mut self) -> Self {
        let geometry = TrackGeometry::new(self.track_length, self.thumb_width);
        self.track_length = geometry.track_length;
        self.thumb_width = geometry.thumb_width;
        if !(self.drag_velocity_gain.is_finite() && self.drag_velocity_gain > 0.0) {
            warn!(
                gain = self.drag_velocity_gain,
                "drag velocity gain out of range, using default"
            );
            self.drag_velocity_gain = DEFAULT_DRAG_VELOCITY_GAIN;
        }
        if !(self.animation_duration.is_finite() && self.animation_duration >= 0.0) {
            warn!(
                duration = self.animation_duration,
                "animation duration out of range, using default"
            );
            self.animation_duration = DEFAULT_ANIMATION_DURATION;
        }
        self
    }
}

// =============================================================================
// Outputs
// =============================================================================

/// Request to move the thumb to a terminal offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Offset before the settle
    pub from: f32,
    /// Terminal offset: `0` when off, `track_length` when on
    pub to: f32,
    /// Play an animation instead of jumping
    pub animated: bool,
    /// Animation duration in seconds
    pub duration: f64,
    /// Animation easing
    pub easing: Easing,
}

/// Receiver of engine outputs. Every method defaults to a no-op.
pub trait SwitchSink {
    /// The thumb moved during a drag.
    fn position_changed(&mut self, _offset: f32) {}

    /// The provisional state flipped mid-drag; recolor, but nothing is committed.
    fn live_state_changed(&mut self, _on: bool) {}

    /// A user gesture committed a state. Never sent for programmatic sets.
    fn state_committed(&mut self, _on: bool) {}

    /// The thumb should settle at a terminal offset.
    fn request_transition(&mut self, _transition: Transition) {}
}

impl SwitchSink for () {}

/// One recorded engine output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SwitchOutput {
    /// See [`SwitchSink::position_changed`]
    PositionChanged {
        /// New offset
        offset: f32,
    },
    /// See [`SwitchSink::live_state_changed`]
    LiveStateChanged {
        /// Provisional state
        on: bool,
    },
    /// See [`SwitchSink::state_committed`]
    StateCommitted {
        /// Committed state
        on: bool,
    },
    /// See [`SwitchSink::request_transition`]
    TransitionRequested(Transition),
}

impl SwitchSink for Vec<SwitchOutput> {
    fn position_changed(&mut self, offset: f32) {
        self.push(SwitchOutput::PositionChanged { offset });
    }

    fn live_state_changed(&mut self, on: bool) {
        self.push(SwitchOutput::LiveStateChanged { on });
    }

    fn state_committed(&mut self, on: bool) {
        self.push(SwitchOutput::StateCommitted { on });
    }

    fn request_transition(&mut self, transition: Transition) {
        self.push(SwitchOutput::TransitionRequested(transition));
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Whether a drag session is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragState {
    /// No drag in progress
    #[default]
    Idle,
    /// Between a drag begin and its end or cancel
    Dragging,
}

/// Translates pointer input into thumb offset and switch state.
#[derive(Debug, Clone)]
pub struct ToggleDragEngine {
    config: DragConfig,
    drag_state: DragState,
    offset: f32,
    on: bool,
    provisional_on: bool,
}

impl ToggleDragEngine {
    /// Create an engine settled at its configured initial state.
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        let config = config.sanitized();
        let on = config.initial_on;
        Self {
            offset: if on { config.track_length } else { 0.0 },
            drag_state: DragState::Idle,
            on,
            provisional_on: on,
            config,
        }
    }

    /// Committed state.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.on
    }

    /// State to display: provisional during a drag, committed otherwise.
    #[must_use]
    pub const fn display_on(&self) -> bool {
        match self.drag_state {
            DragState::Dragging => self.provisional_on,
            DragState::Idle => self.on,
        }
    }

    /// Thumb leading-edge offset in `[0, track_length]`.
    #[must_use]
    pub const fn offset(&self) -> f32 {
        self.offset
    }

    /// Offset as a fraction of the track.
    #[must_use]
    pub fn normalized_offset(&self) -> f32 {
        if self.config.track_length > 0.0 {
            self.offset / self.config.track_length
        } else if self.on {
            1.0
        } else {
            0.0
        }
    }

    /// Current drag state.
    #[must_use]
    pub const fn drag_state(&self) -> DragState {
        self.drag_state
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Push new track geometry, e.g. after a resize.
    ///
    /// When idle the thumb snaps to the terminal offset of the committed
    /// state; mid-drag the offset is only clamped into the new track.
    pub fn configure(&mut self, geometry: TrackGeometry, sink: &mut impl SwitchSink) {
        let geometry = TrackGeometry::new(geometry.track_length, geometry.thumb_width);
        self.config.track_length = geometry.track_length;
        self.config.thumb_width = geometry.thumb_width;
        debug!(
            track_length = geometry.track_length,
            thumb_width = geometry.thumb_width,
            "switch track configured"
        );

        match self.drag_state {
            DragState::Idle => self.settle(false, sink),
            DragState::Dragging => {
                let clamped = self.offset.clamp(0.0, geometry.track_length);
                if clamped != self.offset {
                    self.offset = clamped;
                    sink.position_changed(clamped);
                }
            }
        }
    }

    /// Change the drag velocity gain. Non-positive or non-finite gains are ignored.
    pub fn set_drag_velocity_gain(&mut self, gain: f32) {
        if gain.is_finite() && gain > 0.0 {
            self.config.drag_velocity_gain = gain;
        } else {
            warn!(gain, "ignoring invalid drag velocity gain");
        }
    }

    /// Change the settle animation parameters.
    pub fn set_animation(&mut self, duration: f64, easing: Easing) {
        if duration.is_finite() && duration >= 0.0 {
            self.config.animation_duration = duration;
        }
        self.config.easing = easing;
    }

    /// Feed one gesture phase through the drag state machine.
    ///
    /// | state    | `Began`  | `Changed`         | `Ended`  | `Cancelled` |
    /// |----------|----------|-------------------|----------|-------------|
    /// | Idle     | begin    | begin, then track | ignored  | ignored     |
    /// | Dragging | ignored  | track             | commit   | abandon     |
    pub fn dispatch(&mut self, phase: GesturePhase, sink: &mut impl SwitchSink) {
        match (self.drag_state, phase) {
            (DragState::Idle, GesturePhase::Began) => self.begin(),
            (DragState::Idle, GesturePhase::Changed(dx)) => {
                warn!("drag change without a begin; opening a session");
                self.begin();
                self.track(dx, sink);
            }
            (DragState::Dragging, GesturePhase::Changed(dx)) => self.track(dx, sink),
            (DragState::Dragging, GesturePhase::Ended) => self.commit(sink),
            (DragState::Dragging, GesturePhase::Cancelled) => self.abandon(sink),
            (DragState::Dragging, GesturePhase::Began) => {
                warn!("drag begin while already dragging; ignored");
            }
            (DragState::Idle, GesturePhase::Ended | GesturePhase::Cancelled) => {
                warn!(?phase, "drag end without an open session; ignored");
            }
        }
    }

    /// A drag started. The offset carries over from wherever it was.
    pub fn on_drag_begin(&mut self, sink: &mut impl SwitchSink) {
        self.dispatch(GesturePhase::Began, sink);
    }

    /// The pointer moved by `raw_dx` since the previous drag event.
    pub fn on_drag_changed(&mut self, raw_dx: f32, sink: &mut impl SwitchSink) {
        self.dispatch(GesturePhase::Changed(raw_dx), sink);
    }

    /// The drag finished: commit the provisional state and settle.
    pub fn on_drag_ended(&mut self, sink: &mut impl SwitchSink) {
        self.dispatch(GesturePhase::Ended, sink);
    }

    /// The host abandoned the drag: settle back to the committed state.
    pub fn on_drag_cancelled(&mut self, sink: &mut impl SwitchSink) {
        self.dispatch(GesturePhase::Cancelled, sink);
    }

    /// A discrete click or tap: flip the state, settle animated and notify.
    pub fn on_activate(&mut self, sink: &mut impl SwitchSink) {
        if self.drag_state == DragState::Dragging {
            debug!("activation closes the open drag session");
            self.drag_state = DragState::Idle;
        }
        self.on = !self.on;
        self.settle(true, sink);
        debug!(on = self.on, "switch activated");
        sink.state_committed(self.on);
    }

    /// Programmatic set. Settles but never notifies.
    pub fn set_state(&mut self, on: bool, animated: bool, sink: &mut impl SwitchSink) {
        self.on = on;
        self.settle(animated, sink);
    }

    /// Programmatic toggle. Settles but never notifies.
    pub fn toggle(&mut self, animated: bool, sink: &mut impl SwitchSink) {
        self.set_state(!self.on, animated, sink);
    }

    fn begin(&mut self) {
        trace!(offset = self.offset, "drag began");
        self.drag_state = DragState::Dragging;
    }

    fn track(&mut self, raw_dx: f32, sink: &mut impl SwitchSink) {
        if !raw_dx.is_finite() {
            warn!(raw_dx, "ignoring non-finite drag delta");
            return;
        }

        let length = self.config.track_length;
        let gain = self.config.drag_velocity_gain;
        let leading = self.offset;
        let trailing = (length - leading).max(0.0);

        // Forward motion clamps the delta before gain; backward motion past the
        // start applies gain to the remaining leading space instead.
        let next = if raw_dx >= 0.0 {
            leading + raw_dx.min(trailing) * gain
        } else if leading >= -raw_dx {
            raw_dx.mul_add(gain, leading)
        } else {
            (-leading).mul_add(gain, leading)
        };

        self.offset = next.clamp(0.0, length);
        sink.position_changed(self.offset);
        trace!(raw_dx, offset = self.offset, "drag changed");

        let provisional = self.center_past_midpoint();
        if provisional != self.provisional_on {
            self.provisional_on = provisional;
            debug!(on = provisional, "live state flipped");
            sink.live_state_changed(provisional);
        }
    }

    fn commit(&mut self, sink: &mut impl SwitchSink) {
        self.drag_state = DragState::Idle;
        self.on = self.provisional_on;
        self.settle(true, sink);
        debug!(on = self.on, "drag committed");
        sink.state_committed(self.on);
    }

    fn abandon(&mut self, sink: &mut impl SwitchSink) {
        self.drag_state = DragState::Idle;
        if self.provisional_on != self.on {
            sink.live_state_changed(self.on);
        }
        debug!(on = self.on, "drag cancelled, restoring committed state");
        self.settle(true, sink);
    }

    fn center_past_midpoint(&self) -> bool {
        let thumb = self.config.thumb_width;
        self.offset + thumb / 2.0 >= (self.config.track_length + thumb) / 2.0
    }

    fn settle(&mut self, animated: bool, sink: &mut impl SwitchSink) {
        let from = self.offset;
        let to = if self.on {
            self.config.track_length
        } else {
            0.0
        };
        self.offset = to;
        self.provisional_on = self.on;
        trace!(from, to, animated, "settling thumb");
        sink.request_transition(Transition {
            from,
            to,
            animated,
            duration: self.config.animation_duration,
            easing: self.config.easing,
        });
    }
}

impl Default for ToggleDragEngine {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}
