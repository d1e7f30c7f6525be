//! Draggable on/off switch widget.

use flipswitch_core::{
    Canvas, Color, Constraints, DragConfig, DragState, EasedValue, Easing, Event, GestureConfig,
    LayoutResult, Point, PointerRecognizer, Rect, Size, SwitchGesture, SwitchSink, SwitchTheme,
    ToggleDragEngine, TrackGeometry, Transition, TypeId, Widget,
};
use flipswitch_yaml::{ParseError, SwitchEntry};
use std::any::Any;
use tracing::{debug, trace};

/// Message emitted when a user gesture commits the switch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchChanged {
    /// The committed state
    pub on: bool,
}

/// Switch widget (on/off) with a draggable thumb.
#[derive(Debug, Clone)]
pub struct Switch {
    /// State engine
    engine: ToggleDragEngine,
    /// Pan/tap recognizer
    recognizer: PointerRecognizer,
    /// Colors
    theme: SwitchTheme,
    /// Preferred width
    width: f32,
    /// Preferred height (also the thumb diameter)
    height: f32,
    /// Whether the switch ignores input
    disabled: bool,
    /// Test ID
    test_id_value: Option<String>,
    /// Offset the thumb is drawn at
    displayed_offset: f32,
    /// Settle animation in flight
    animation: Option<EasedValue>,
    /// Cached bounds
    bounds: Rect,
}

impl Default for Switch {
    fn default() -> Self {
        Self::with_config(DragConfig::default().geometry(TrackGeometry::from_extent(52.0, 32.0)))
    }
}

impl Switch {
    /// Create a new switch, initially off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a switch with initial state.
    #[must_use]
    pub fn with_state(on: bool) -> Self {
        Self::default().on(on)
    }

    /// Create a switch from an engine configuration.
    ///
    /// The preferred size is the configured background width by thumb width.
    #[must_use]
    pub fn with_config(config: DragConfig) -> Self {
        let geometry = config.track_geometry();
        let engine = ToggleDragEngine::new(config);
        Self {
            displayed_offset: engine.offset(),
            engine,
            recognizer: PointerRecognizer::new(),
            theme: SwitchTheme::default(),
            width: geometry.background_width(),
            height: geometry.thumb_width,
            disabled: false,
            test_id_value: None,
            animation: None,
            bounds: Rect::default(),
        }
    }

    /// Create a switch from a manifest entry.
    pub fn from_entry(entry: &SwitchEntry) -> Result<Self, ParseError> {
        entry.validate()?;
        Ok(Self::with_config(entry.drag_config())
            .theme(entry.theme()?)
            .test_id(entry.id.clone()))
    }

    /// Set the initial state without animation.
    #[must_use]
    pub fn on(mut self, on: bool) -> Self {
        self.set_on(on, false);
        self
    }

    /// Set the preferred size. The thumb diameter follows the height.
    #[must_use]
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.height = height.max(8.0);
        self.width = width.max(self.height);
        self.reconfigure(self.width, self.height);
        self
    }

    /// Set all colors.
    #[must_use]
    pub const fn theme(mut self, theme: SwitchTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the track color when on.
    #[must_use]
    pub const fn on_color(mut self, color: Color) -> Self {
        self.theme.on_color = color;
        self
    }

    /// Set the track color when off.
    #[must_use]
    pub const fn off_color(mut self, color: Color) -> Self {
        self.theme.off_color = color;
        self
    }

    /// Set the thumb color.
    #[must_use]
    pub const fn thumb_color(mut self, color: Color) -> Self {
        self.theme.thumb_color = color;
        self
    }

    /// Set the drag velocity gain.
    #[must_use]
    pub fn drag_velocity_gain(mut self, gain: f32) -> Self {
        self.engine.set_drag_velocity_gain(gain);
        self
    }

    /// Set the settle animation.
    #[must_use]
    pub fn animation(mut self, duration: f64, easing: Easing) -> Self {
        self.engine.set_animation(duration, easing);
        self
    }

    /// Set the pan recognition config.
    #[must_use]
    pub const fn gesture_config(mut self, config: GestureConfig) -> Self {
        self.recognizer = PointerRecognizer::with_config(config);
        self
    }

    /// Set whether the switch is disabled.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Get committed state.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.engine.is_on()
    }

    /// State the track is colored for (provisional during a drag).
    #[must_use]
    pub const fn display_on(&self) -> bool {
        self.engine.display_on()
    }

    /// Get disabled state.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.engine.drag_state() == DragState::Dragging
    }

    /// Whether a settle animation is still playing.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Offset the thumb is currently drawn at.
    #[must_use]
    pub const fn displayed_offset(&self) -> f32 {
        self.displayed_offset
    }

    /// Preferred size.
    #[must_use]
    pub const fn preferred_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Colors in use.
    #[must_use]
    pub const fn get_theme(&self) -> &SwitchTheme {
        &self.theme
    }

    /// The underlying state engine.
    #[must_use]
    pub const fn engine(&self) -> &ToggleDragEngine {
        &self.engine
    }

    /// Programmatic set. Never produces a [`SwitchChanged`].
    pub fn set_on(&mut self, on: bool, animated: bool) {
        let mut sink = HostSink::new(&mut self.displayed_offset, &mut self.animation);
        self.engine.set_state(on, animated, &mut sink);
    }

    /// Programmatic toggle. Never produces a [`SwitchChanged`].
    pub fn toggle(&mut self, animated: bool) {
        let mut sink = HostSink::new(&mut self.displayed_offset, &mut self.animation);
        self.engine.toggle(animated, &mut sink);
    }

    /// Enable or disable input. Disabling mid-drag cancels the drag.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled && self.recognizer.cancel().is_some() {
            let mut sink = HostSink::new(&mut self.displayed_offset, &mut self.animation);
            self.engine.on_drag_cancelled(&mut sink);
        }
    }

    /// Advance the settle animation by `dt` seconds.
    ///
    /// Returns `true` while the animation is still playing.
    pub fn tick(&mut self, dt: f64) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        animation.update(dt);
        self.displayed_offset = animation.value() as f32;
        if animation.is_complete() {
            trace!(offset = self.displayed_offset, "settle animation finished");
            self.animation = None;
            false
        } else {
            true
        }
    }

    fn reconfigure(&mut self, width: f32, height: f32) {
        let mut sink = HostSink::new(&mut self.displayed_offset, &mut self.animation);
        self.engine
            .configure(TrackGeometry::from_extent(width, height), &mut sink);
    }

    fn thumb_rect(&self) -> Rect {
        Rect::new(
            self.bounds.x + self.displayed_offset,
            self.bounds.y,
            self.bounds.height,
            self.bounds.height,
        )
    }
}

/// Applies engine outputs to the widget's displayed thumb.
struct HostSink<'a> {
    displayed_offset: &'a mut f32,
    animation: &'a mut Option<EasedValue>,
    committed: Option<bool>,
}

impl<'a> HostSink<'a> {
    fn new(displayed_offset: &'a mut f32, animation: &'a mut Option<EasedValue>) -> Self {
        Self {
            displayed_offset,
            animation,
            committed: None,
        }
    }
}

impl SwitchSink for HostSink<'_> {
    fn position_changed(&mut self, offset: f32) {
        *self.displayed_offset = offset;
        *self.animation = None;
    }

    fn live_state_changed(&mut self, on: bool) {
        trace!(on, "track recolored");
    }

    fn state_committed(&mut self, on: bool) {
        self.committed = Some(on);
    }

    fn request_transition(&mut self, transition: Transition) {
        let from = *self.displayed_offset;
        let moves = (from - transition.to).abs() > f32::EPSILON;
        if transition.animated && transition.duration > 0.0 && moves {
            *self.animation = Some(
                EasedValue::new(f64::from(from), f64::from(transition.to), transition.duration)
                    .with_easing(transition.easing),
            );
        } else {
            *self.displayed_offset = transition.to;
            *self.animation = None;
        }
    }
}

impl Widget for Switch {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.preferred_size())
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        let resized = bounds.size() != self.bounds.size();
        self.bounds = bounds;
        if resized {
            debug!(
                width = bounds.width,
                height = bounds.height,
                "switch resized"
            );
            self.reconfigure(bounds.width, bounds.height);
        }
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let radius = self.bounds.height / 2.0;
        let mut track_color = self.theme.track_color(self.display_on());
        let mut thumb_color = self.theme.thumb_color;
        if self.disabled {
            track_color = track_color.lerp(&Color::WHITE, 0.5);
            thumb_color = thumb_color.lerp(&Color::WHITE, 0.5);
        }

        canvas.fill_rounded_rect(self.bounds, radius, track_color);

        let center = Point::new(
            self.bounds.x + self.displayed_offset + radius,
            self.bounds.y + radius,
        );
        canvas.fill_circle(center, radius, thumb_color);
        canvas.stroke_circle(
            center,
            (radius - 0.5).max(0.0),
            self.theme.thumb_outline_color,
            self.theme.thumb_outline_width,
        );
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.disabled {
            return None;
        }

        let thumb = self.thumb_rect();
        let gestures = self.recognizer.process(event, self.bounds, thumb);
        if gestures.is_empty() {
            return None;
        }

        let mut sink = HostSink::new(&mut self.displayed_offset, &mut self.animation);
        for gesture in gestures {
            match gesture {
                SwitchGesture::Pan(phase) => self.engine.dispatch(phase, &mut sink),
                SwitchGesture::Tap => self.engine.on_activate(&mut sink),
            }
        }

        sink.committed
            .map(|on| Box::new(SwitchChanged { on }) as Box<dyn Any + Send>)
    }

    fn is_interactive(&self) -> bool {
        !self.disabled
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipswitch_core::{DrawCommand, MouseButton, RecordingCanvas};

    fn laid_out(switch: Switch) -> Switch {
        let mut switch = switch;
        switch.layout(Rect::new(0.0, 0.0, 132.0, 32.0));
        switch
    }

    fn down(x: f32) -> Event {
        Event::MouseDown {
            position: Point::new(x, 16.0),
            button: MouseButton::Left,
        }
    }

    fn mv(x: f32) -> Event {
        Event::MouseMove {
            position: Point::new(x, 16.0),
        }
    }

    fn up(x: f32) -> Event {
        Event::MouseUp {
            position: Point::new(x, 16.0),
            button: MouseButton::Left,
        }
    }

    fn changed(msg: Option<Box<dyn Any + Send>>) -> Option<SwitchChanged> {
        msg.and_then(|m| m.downcast::<SwitchChanged>().ok()).map(|m| *m)
    }

    fn settle(switch: &mut Switch) {
        while switch.tick(1.0 / 60.0) {}
    }

    // ===== SwitchChanged Tests =====

    #[test]
    fn test_switch_changed_message() {
        assert!(SwitchChanged { on: true }.on);
        assert!(!SwitchChanged { on: false }.on);
    }

    // ===== Construction Tests =====

    #[test]
    fn test_switch_new() {
        let switch = Switch::new();
        assert!(!switch.is_on());
        assert!(!switch.is_disabled());
        assert_eq!(switch.preferred_size(), Size::new(52.0, 32.0));
        assert_eq!(switch.displayed_offset(), 0.0);
    }

    #[test]
    fn test_switch_with_state_on() {
        let switch = Switch::with_state(true);
        assert!(switch.is_on());
        assert_eq!(switch.displayed_offset(), 20.0);
        assert!(!switch.is_animating());
    }

    #[test]
    fn test_switch_builder() {
        let switch = Switch::new()
            .size(80.0, 30.0)
            .on(true)
            .on_color(Color::rgb(0.0, 0.8, 0.4))
            .off_color(Color::rgb(0.5, 0.5, 0.5))
            .thumb_color(Color::WHITE)
            .drag_velocity_gain(0.5)
            .animation(0.3, Easing::CubicOut)
            .test_id("traffic");

        assert!(switch.is_on());
        assert_eq!(switch.preferred_size(), Size::new(80.0, 30.0));
        assert_eq!(switch.engine().config().track_length, 50.0);
        assert_eq!(switch.engine().config().drag_velocity_gain, 0.5);
        assert_eq!(switch.engine().config().easing, Easing::CubicOut);
        assert_eq!(switch.get_theme().thumb_color, Color::WHITE);
        assert_eq!(Widget::test_id(&switch), Some("traffic"));
    }

    #[test]
    fn test_switch_size_minimums() {
        let switch = Switch::new().size(2.0, 2.0);
        assert_eq!(switch.preferred_size(), Size::new(8.0, 8.0));
        assert_eq!(switch.engine().config().track_length, 0.0);
    }

    #[test]
    fn test_switch_from_entry() {
        let mut entry = SwitchEntry::new("compass");
        entry.on = true;
        entry.colors.thumb = Some("#ffffff".to_string());
        let switch = Switch::from_entry(&entry).unwrap();
        assert!(switch.is_on());
        assert_eq!(switch.get_theme().thumb_color, Color::WHITE);
        assert_eq!(Widget::test_id(&switch), Some("compass"));
    }

    #[test]
    fn test_switch_from_invalid_entry() {
        let mut entry = SwitchEntry::new("compass");
        entry.width = 10.0;
        assert!(Switch::from_entry(&entry).is_err());
    }

    // ===== Programmatic State Tests =====

    #[test]
    fn test_set_on_animated_plays_and_settles() {
        let mut switch = laid_out(Switch::new());
        switch.set_on(true, true);
        assert!(switch.is_on());
        assert!(switch.is_animating());
        assert_eq!(switch.displayed_offset(), 0.0);

        settle(&mut switch);
        assert!(!switch.is_animating());
        assert_eq!(switch.displayed_offset(), 100.0);
    }

    #[test]
    fn test_set_on_immediate_jumps() {
        let mut switch = laid_out(Switch::new());
        switch.set_on(true, false);
        assert!(!switch.is_animating());
        assert_eq!(switch.displayed_offset(), 100.0);
    }

    #[test]
    fn test_toggle_method() {
        let mut switch = laid_out(Switch::new());
        switch.toggle(false);
        assert!(switch.is_on());
        switch.toggle(false);
        assert!(!switch.is_on());
    }

    #[test]
    fn test_tick_without_animation() {
        let mut switch = Switch::new();
        assert!(!switch.tick(0.1));
    }

    // ===== Layout Tests =====

    #[test]
    fn test_measure_uses_preferred_size() {
        let switch = Switch::new();
        let size = switch.measure(Constraints::loose(Size::new(200.0, 100.0)));
        assert_eq!(size, Size::new(52.0, 32.0));

        let size = switch.measure(Constraints::tight(Size::new(40.0, 20.0)));
        assert_eq!(size, Size::new(40.0, 20.0));
    }

    #[test]
    fn test_layout_reconfigures_track() {
        let mut switch = Switch::with_state(true);
        let result = switch.layout(Rect::new(10.0, 10.0, 132.0, 32.0));
        assert_eq!(result.size, Size::new(132.0, 32.0));
        assert_eq!(switch.engine().config().track_length, 100.0);
        assert_eq!(switch.displayed_offset(), 100.0);
        assert_eq!(Widget::bounds(&switch), Rect::new(10.0, 10.0, 132.0, 32.0));
    }

    #[test]
    fn test_layout_same_size_keeps_animation() {
        let mut switch = laid_out(Switch::new());
        switch.set_on(true, true);
        switch.tick(0.05);
        switch.layout(Rect::new(5.0, 0.0, 132.0, 32.0));
        assert!(switch.is_animating());
    }

    // ===== Paint Tests =====

    #[test]
    fn test_paint_track_and_thumb() {
        let switch = laid_out(Switch::with_state(true));
        let mut canvas = RecordingCanvas::new();
        switch.paint(&mut canvas);

        assert_eq!(canvas.command_count(), 3);
        match &canvas.commands()[0] {
            DrawCommand::RoundedRect { color, radius, .. } => {
                assert_eq!(*color, SwitchTheme::default().on_color);
                assert_eq!(*radius, 16.0);
            }
            other => panic!("Expected track, got {other:?}"),
        }
        match &canvas.commands()[1] {
            DrawCommand::Circle { center, .. } => {
                assert_eq!(*center, Point::new(116.0, 16.0));
            }
            other => panic!("Expected thumb, got {other:?}"),
        }
        assert!(matches!(
            canvas.commands()[2],
            DrawCommand::CircleOutline { width, .. } if width == 0.125
        ));
    }

    #[test]
    fn test_paint_uses_live_state_while_dragging() {
        let mut switch = laid_out(Switch::new().drag_velocity_gain(1.0));
        switch.event(&down(16.0));
        switch.event(&mv(86.0));
        assert!(switch.is_dragging());
        assert!(switch.display_on());
        assert!(!switch.is_on());

        let mut canvas = RecordingCanvas::new();
        switch.paint(&mut canvas);
        assert!(matches!(
            canvas.commands()[0],
            DrawCommand::RoundedRect { color, .. } if color == SwitchTheme::default().on_color
        ));
    }

    // ===== Event Tests =====

    #[test]
    fn test_click_toggles_and_emits() {
        let mut switch = laid_out(Switch::new());
        assert!(switch.event(&down(100.0)).is_none());
        let msg = changed(switch.event(&up(100.0)));
        assert_eq!(msg, Some(SwitchChanged { on: true }));
        assert!(switch.is_on());
        assert!(switch.is_animating());

        settle(&mut switch);
        let msg = changed({
            switch.event(&down(100.0));
            switch.event(&up(100.0))
        });
        assert_eq!(msg, Some(SwitchChanged { on: false }));
    }

    #[test]
    fn test_drag_release_commits() {
        let mut switch = laid_out(Switch::new().drag_velocity_gain(1.0));
        switch.event(&down(16.0));
        assert!(switch.event(&mv(46.0)).is_none());
        assert_eq!(switch.displayed_offset(), 30.0);
        assert!(switch.event(&mv(86.0)).is_none());
        assert_eq!(switch.displayed_offset(), 70.0);

        let msg = changed(switch.event(&up(86.0)));
        assert_eq!(msg, Some(SwitchChanged { on: true }));
        assert!(!switch.is_dragging());
        assert!(switch.is_animating());

        settle(&mut switch);
        assert_eq!(switch.displayed_offset(), 100.0);
    }

    #[test]
    fn test_short_drag_settles_back_off() {
        let mut switch = laid_out(Switch::new().drag_velocity_gain(1.0));
        switch.event(&down(16.0));
        switch.event(&mv(36.0));
        let msg = changed(switch.event(&up(36.0)));
        assert_eq!(msg, Some(SwitchChanged { on: false }));
        settle(&mut switch);
        assert_eq!(switch.displayed_offset(), 0.0);
    }

    #[test]
    fn test_drag_interrupts_settle_animation() {
        let mut switch = laid_out(Switch::new().drag_velocity_gain(1.0));
        switch.set_on(true, true);
        switch.tick(0.1);
        assert!(switch.is_animating());

        // The engine already sits at the terminal offset, so the drag starts there.
        switch.event(&down(switch.displayed_offset() + 16.0));
        switch.event(&mv(switch.displayed_offset() + 10.0 + 16.0));
        assert!(!switch.is_animating());
    }

    #[test]
    fn test_focus_out_cancels_drag_without_message() {
        let mut switch = laid_out(Switch::new().drag_velocity_gain(1.0));
        switch.event(&down(16.0));
        switch.event(&mv(96.0));
        assert!(switch.display_on());

        assert!(switch.event(&Event::FocusOut).is_none());
        assert!(!switch.is_dragging());
        assert!(!switch.is_on());
        settle(&mut switch);
        assert_eq!(switch.displayed_offset(), 0.0);
    }

    #[test]
    fn test_disabled_ignores_events() {
        let mut switch = laid_out(Switch::new().disabled(true));
        assert!(switch.event(&down(100.0)).is_none());
        assert!(switch.event(&up(100.0)).is_none());
        assert!(!switch.is_on());
        assert!(!switch.is_interactive());
    }

    #[test]
    fn test_disable_mid_drag_cancels() {
        let mut switch = laid_out(Switch::new().drag_velocity_gain(1.0));
        switch.event(&down(16.0));
        switch.event(&mv(96.0));
        switch.set_disabled(true);
        assert!(!switch.is_dragging());
        assert!(!switch.is_on());
    }

    #[test]
    fn test_event_unrelated_returns_none() {
        let mut switch = laid_out(Switch::new());
        assert!(switch.event(&Event::MouseLeave).is_none());
        assert!(switch.event(&mv(50.0)).is_none());
    }
}
