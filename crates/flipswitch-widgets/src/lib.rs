//! Widgets for flipswitch.
//!
//! [`Switch`] hosts a [`flipswitch_core::ToggleDragEngine`]: it turns pointer
//! events into drag phases and taps, plays the settle animation, and paints
//! the track and thumb.

mod switch;

pub use switch::{Switch, SwitchChanged};
