//! Synthetic mouse and keyboard output.
//!
//! [`OutputSink`] turns fractional motion and wheel deltas into whole
//! platform events. The sub-unit remainder of every axis is carried over to
//! the next call, so a stream of small deltas never drifts.

pub mod keys;
#[cfg(windows)]
pub mod sendinput;

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

pub use keys::{Key, MouseButton, ScrollStep, WHEEL_DELTA};

/// One event handed to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedEvent {
    MouseMove { dx: i32, dy: i32 },
    Wheel { delta: i32 },
    HorizontalWheel { delta: i32 },
    MouseButton { button: MouseButton, pressed: bool },
    Key { key: Key, pressed: bool },
}

impl fmt::Display for InjectedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge = |pressed: bool| if pressed { "down" } else { "up" };
        match self {
            InjectedEvent::MouseMove { dx, dy } => write!(f, "move {dx},{dy}"),
            InjectedEvent::Wheel { delta } => write!(f, "wheel {delta}"),
            InjectedEvent::HorizontalWheel { delta } => write!(f, "hwheel {delta}"),
            InjectedEvent::MouseButton { button, pressed } => {
                write!(f, "{button} {}", edge(*pressed))
            }
            InjectedEvent::Key { key, pressed } => write!(f, "{key} {}", edge(*pressed)),
        }
    }
}

/// Platform seam for injecting input events.
///
/// Injection is fire-and-forget: implementations swallow failures.
pub trait InputInjector: Send {
    fn inject(&mut self, event: InjectedEvent);
}

/// Logs every event instead of injecting it.
#[derive(Debug, Default)]
pub struct LoggingInjector;

impl InputInjector for LoggingInjector {
    fn inject(&mut self, event: InjectedEvent) {
        info!(target: "gamepad_mouse::dry_run", "{}", event);
    }
}

/// Captures events in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingInjector {
    events: Arc<Mutex<Vec<InjectedEvent>>>,
}

impl RecordingInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<InjectedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drains the buffer.
    pub fn take(&self) -> Vec<InjectedEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl InputInjector for RecordingInjector {
    fn inject(&mut self, event: InjectedEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Adds `delta` to `remainder` and splits off the whole part.
///
/// Returns the truncated integer, leaving the fractional rest in `remainder`.
#[inline]
fn accumulate(remainder: &mut f64, delta: f64) -> i32 {
    *remainder += delta;
    let whole = remainder.trunc();
    if whole != 0.0 {
        *remainder -= whole;
    }
    whole as i32
}

/// Stateful mouse/keyboard emitter shared by all devices.
pub struct OutputSink {
    injector: Box<dyn InputInjector>,
    move_remainder: [f64; 2],
    scroll_remainder: [f64; 2],
}

impl OutputSink {
    pub fn new(injector: Box<dyn InputInjector>) -> Self {
        Self {
            injector,
            move_remainder: [0.0; 2],
            scroll_remainder: [0.0; 2],
        }
    }

    /// Moves the cursor by a fractional amount in screen coordinates.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        let x = accumulate(&mut self.move_remainder[0], dx);
        let y = accumulate(&mut self.move_remainder[1], dy);
        if x != 0 || y != 0 {
            self.injector
                .inject(InjectedEvent::MouseMove { dx: x, dy: y });
        }
    }

    pub fn move_x(&mut self, dx: f64) {
        self.move_by(dx, 0.0);
    }

    pub fn move_y(&mut self, dy: f64) {
        self.move_by(0.0, dy);
    }

    /// Scrolls both wheels; positive `dy` scrolls up, positive `dx` right.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.scroll_x(dx);
        self.scroll_y(dy);
    }

    pub fn scroll_x(&mut self, dx: f64) {
        let delta = accumulate(&mut self.scroll_remainder[0], dx);
        if delta != 0 {
            self.injector.inject(InjectedEvent::HorizontalWheel { delta });
        }
    }

    pub fn scroll_y(&mut self, dy: f64) {
        let delta = accumulate(&mut self.scroll_remainder[1], dy);
        if delta != 0 {
            self.injector.inject(InjectedEvent::Wheel { delta });
        }
    }

    /// Scrolls one wheel notch.
    pub fn scroll_step(&mut self, step: ScrollStep) {
        let (dx, dy) = step.delta();
        self.scroll_by(dx, dy);
    }

    pub fn press_key(&mut self, key: Key) {
        self.injector.inject(InjectedEvent::Key { key, pressed: true });
    }

    pub fn release_key(&mut self, key: Key) {
        self.injector.inject(InjectedEvent::Key {
            key,
            pressed: false,
        });
    }

    pub fn press_mouse_button(&mut self, button: MouseButton) {
        self.injector.inject(InjectedEvent::MouseButton {
            button,
            pressed: true,
        });
    }

    pub fn release_mouse_button(&mut self, button: MouseButton) {
        self.injector.inject(InjectedEvent::MouseButton {
            button,
            pressed: false,
        });
    }

    /// Presses `keys` in order, then releases them in reverse.
    pub fn shortcut(&mut self, keys: &[Key]) {
        for &key in keys {
            self.press_key(key);
        }
        for &key in keys.iter().rev() {
            self.release_key(key);
        }
    }
}
