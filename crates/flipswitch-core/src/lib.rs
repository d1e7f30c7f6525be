//! Core types and the drag/toggle state engine for flipswitch.
//!
//! This crate provides:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color and theme data: [`Color`], [`SwitchTheme`]
//! - Events and gestures: [`Event`], [`GesturePhase`], [`PointerRecognizer`]
//! - Settle animation: [`Easing`], [`EasedValue`]
//! - The switch state engine: [`ToggleDragEngine`]

mod animation;
mod canvas;
mod color;
mod constraints;
pub mod engine;
mod event;
mod geometry;
pub mod gesture;
mod theme;
pub mod widget;

pub use animation::{EasedValue, Easing};
pub use canvas::{DrawCommand, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use engine::{
    DragConfig, DragState, SwitchOutput, SwitchSink, ToggleDragEngine, TrackGeometry, Transition,
    DEFAULT_ANIMATION_DURATION, DEFAULT_DRAG_VELOCITY_GAIN,
};
pub use event::{Event, GesturePhase, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use gesture::{GestureConfig, PointerRecognizer, SwitchGesture};
pub use theme::SwitchTheme;
pub use widget::{Canvas, LayoutResult, TypeId, Widget};
