//! Bindable actions.
//!
//! Every [`Action`] is resolved at bind time into a press and a release
//! [`Callback`]. Callbacks get an [`ActionContext`] with the shared outputs
//! and the control block of the device they belong to, so no action ever
//! needs to capture a reference to its own device.

use std::fmt;

use crate::keyboard::OnScreenKeyboard;
use crate::output::{Key, MouseButton, OutputSink, ScrollStep};
use crate::registry::Outputs;

/// Edge callback, run on press or release.
pub type Callback = Box<dyn FnMut(&mut ActionContext<'_>) + Send>;

/// Continuous callback for one axis, receives the scaled value every tick.
pub type AxisCallback = Box<dyn FnMut(&mut ActionContext<'_>, f64) + Send>;

/// Continuous callback for a stick, receives the scaled vector.
pub type StickCallback = Box<dyn FnMut(&mut ActionContext<'_>, f64, f64) + Send>;

/// Boxes a closure as a [`Callback`].
pub fn callback<F>(f: F) -> Callback
where
    F: FnMut(&mut ActionContext<'_>) + Send + 'static,
{
    Box::new(f)
}

pub fn axis_callback<F>(f: F) -> AxisCallback
where
    F: FnMut(&mut ActionContext<'_>, f64) + Send + 'static,
{
    Box::new(f)
}

pub fn stick_callback<F>(f: F) -> StickCallback
where
    F: FnMut(&mut ActionContext<'_>, f64, f64) + Send + 'static,
{
    Box::new(f)
}

/// What a callback may touch while it runs.
pub struct ActionContext<'a> {
    pub sink: &'a mut OutputSink,
    pub keyboard: &'a mut OnScreenKeyboard,
    pub device: &'a mut DeviceControl,
}

impl<'a> ActionContext<'a> {
    pub fn new(outputs: &'a mut Outputs, device: &'a mut DeviceControl) -> Self {
        Self {
            sink: &mut outputs.sink,
            keyboard: &mut outputs.keyboard,
            device,
        }
    }
}

/// Per-device flags that actions are allowed to change.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceControl {
    index: usize,
    enabled: bool,
    rumble: Option<(f64, f64)>,
}

impl DeviceControl {
    pub fn new(index: usize, enabled: bool) -> Self {
        Self {
            index,
            enabled,
            rumble: None,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn apply(&mut self, event: DeviceEvent) {
        match event {
            DeviceEvent::Enable => self.set_enabled(true),
            DeviceEvent::Disable => self.set_enabled(false),
            DeviceEvent::Toggle => self.toggle(),
        }
    }

    /// Queues a motor change; the device applies it after dispatch.
    pub fn request_rumble(&mut self, left: f64, right: f64) {
        self.rumble = Some((left, right));
    }

    pub fn take_rumble(&mut self) -> Option<(f64, f64)> {
        self.rumble.take()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceEvent {
    Enable,
    Disable,
    Toggle,
}

/// Edge-triggered action.
pub enum Action {
    None,
    /// Held for as long as the input is held.
    MouseButton(MouseButton),
    /// Held for as long as the input is held.
    Key(Key),
    /// One wheel notch on press.
    Scroll(ScrollStep),
    /// Taps a key chord on press.
    Shortcut(Vec<Key>),
    Device(DeviceEvent),
    /// Toggles the on-screen keyboard on press.
    OnScreenKeyboard,
    /// Runs the motors while the input is held.
    Rumble { left: f64, right: f64 },
    /// Presses in order, releases in reverse.
    Chain(Vec<Action>),
    Custom { press: Callback, release: Callback },
}

impl Action {
    /// Resolves this action into its press and release callbacks.
    pub fn into_handlers(self) -> (Callback, Callback) {
        match self {
            Action::None => (callback(|_| {}), callback(|_| {})),
            Action::MouseButton(button) => (
                callback(move |ctx| ctx.sink.press_mouse_button(button)),
                callback(move |ctx| ctx.sink.release_mouse_button(button)),
            ),
            Action::Key(key) => (
                callback(move |ctx| ctx.sink.press_key(key)),
                callback(move |ctx| ctx.sink.release_key(key)),
            ),
            Action::Scroll(step) => (
                callback(move |ctx| ctx.sink.scroll_step(step)),
                callback(|_| {}),
            ),
            Action::Shortcut(keys) => (
                callback(move |ctx| ctx.sink.shortcut(&keys)),
                callback(|_| {}),
            ),
            Action::Device(event) => (
                callback(move |ctx| ctx.device.apply(event)),
                callback(|_| {}),
            ),
            Action::OnScreenKeyboard => (callback(|ctx| ctx.keyboard.toggle()), callback(|_| {})),
            Action::Rumble { left, right } => (
                callback(move |ctx| ctx.device.request_rumble(left, right)),
                callback(|ctx| ctx.device.request_rumble(0.0, 0.0)),
            ),
            Action::Chain(actions) => {
                let (mut presses, mut releases): (Vec<_>, Vec<_>) =
                    actions.into_iter().map(Action::into_handlers).unzip();
                (
                    callback(move |ctx| {
                        for press in presses.iter_mut() {
                            press(ctx);
                        }
                    }),
                    callback(move |ctx| {
                        for release in releases.iter_mut().rev() {
                            release(ctx);
                        }
                    }),
                )
            }
            Action::Custom { press, release } => (press, release),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::None => f.write_str("None"),
            Action::MouseButton(button) => f.debug_tuple("MouseButton").field(button).finish(),
            Action::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Action::Scroll(step) => f.debug_tuple("Scroll").field(step).finish(),
            Action::Shortcut(keys) => f.debug_tuple("Shortcut").field(keys).finish(),
            Action::Device(event) => f.debug_tuple("Device").field(event).finish(),
            Action::OnScreenKeyboard => f.write_str("OnScreenKeyboard"),
            Action::Rumble { left, right } => f
                .debug_struct("Rumble")
                .field("left", left)
                .field("right", right)
                .finish(),
            Action::Chain(actions) => f.debug_tuple("Chain").field(actions).finish(),
            Action::Custom { .. } => f.write_str("Custom"),
        }
    }
}

/// Continuous action for a single axis.
pub enum AxisAction {
    ScrollX,
    ScrollY,
    MoveX,
    MoveY,
    Custom(AxisCallback),
}

impl AxisAction {
    pub fn into_callback(self) -> AxisCallback {
        match self {
            AxisAction::ScrollX => axis_callback(|ctx, value| ctx.sink.scroll_x(value)),
            AxisAction::ScrollY => axis_callback(|ctx, value| ctx.sink.scroll_y(value)),
            AxisAction::MoveX => axis_callback(|ctx, value| ctx.sink.move_x(value)),
            AxisAction::MoveY => axis_callback(|ctx, value| ctx.sink.move_y(value)),
            AxisAction::Custom(callback) => callback,
        }
    }
}

/// Continuous action for a stick.
pub enum StickAction {
    /// Stick up moves the cursor up, so screen Y is inverted.
    MoveCursor,
    Scroll,
    Custom(StickCallback),
}

impl StickAction {
    pub fn into_callback(self) -> StickCallback {
        match self {
            StickAction::MoveCursor => stick_callback(|ctx, x, y| ctx.sink.move_by(x, -y)),
            StickAction::Scroll => stick_callback(|ctx, x, y| ctx.sink.scroll_by(x, y)),
            StickAction::Custom(callback) => callback,
        }
    }
}
