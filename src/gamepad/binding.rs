//! Per-channel bindings: edge-triggered buttons, axes and sticks.

use crate::action::{ActionContext, AxisCallback, Callback, StickCallback};

pub const DEFAULT_PRESS_THRESHOLD: f64 = 0.5;
pub const DEFAULT_RELEASE_THRESHOLD: f64 = 0.25;
pub const DEFAULT_AXIS_THRESHOLD: f64 = 0.25;

/// Shapes `(x, y)` through a radial dead zone of radius `threshold`.
///
/// Inside the dead zone the result is `(0, 0)`. Outside it the magnitude is
/// rescaled to `(len - t) / (1 - t)`, capped at 1, keeping the direction.
pub fn apply_radial_deadzone(x: f64, y: f64, threshold: f64) -> (f64, f64) {
    let len = x.hypot(y);
    if len <= threshold {
        return (0.0, 0.0);
    }
    let scale = ((len - threshold) / (1.0 - threshold)).min(1.0) / len;
    (x * scale, y * scale)
}

/// One-dimensional dead zone used by continuous axes.
#[inline]
pub fn apply_linear_deadzone(value: f64, threshold: f64) -> f64 {
    (value - threshold).max(0.0) / (1.0 - threshold)
}

#[inline]
fn fire(callback: &mut Option<Callback>, ctx: &mut ActionContext<'_>) {
    if let Some(callback) = callback {
        callback(ctx);
    }
}

/// Edge detector for a digital input.
pub struct Button {
    pressed: bool,
    press: Option<Callback>,
    release: Option<Callback>,
}

impl Button {
    pub fn new(press: Option<Callback>, release: Option<Callback>) -> Self {
        Self {
            pressed: false,
            press,
            release,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn update(&mut self, ctx: &mut ActionContext<'_>, pressed: bool) {
        if pressed == self.pressed {
            return;
        }
        self.pressed = pressed;
        if pressed {
            fire(&mut self.press, ctx);
        } else {
            fire(&mut self.release, ctx);
        }
    }
}

enum AxisMode {
    Continuous {
        speed: f64,
        threshold: f64,
        callback: AxisCallback,
    },
    Threshold {
        press_threshold: f64,
        release_threshold: f64,
        button: Button,
    },
}

/// Analog input, either continuous or a button with hysteresis.
///
/// The mode is chosen at construction and never changes.
pub struct Axis {
    mode: AxisMode,
}

impl Axis {
    /// Invokes `callback` every tick with `speed * deadzoned(value)`.
    pub fn continuous(speed: f64, threshold: f64, callback: AxisCallback) -> Self {
        Self {
            mode: AxisMode::Continuous {
                speed,
                threshold,
                callback,
            },
        }
    }

    /// Acts as a button that presses at `press_threshold` and releases at
    /// `release_threshold`.
    pub fn threshold(
        press_threshold: f64,
        release_threshold: f64,
        press: Option<Callback>,
        release: Option<Callback>,
    ) -> Self {
        Self {
            mode: AxisMode::Threshold {
                press_threshold,
                release_threshold,
                button: Button::new(press, release),
            },
        }
    }

    pub fn is_pressed(&self) -> bool {
        match &self.mode {
            AxisMode::Continuous { .. } => false,
            AxisMode::Threshold { button, .. } => button.is_pressed(),
        }
    }

    pub fn update(&mut self, ctx: &mut ActionContext<'_>, value: f64) {
        match &mut self.mode {
            AxisMode::Continuous {
                speed,
                threshold,
                callback,
            } => callback(ctx, *speed * apply_linear_deadzone(value, *threshold)),
            AxisMode::Threshold {
                press_threshold,
                release_threshold,
                button,
            } => {
                let normalized =
                    (value - *release_threshold) / (*press_threshold - *release_threshold);
                if normalized >= 1.0 {
                    button.update(ctx, true);
                } else if normalized <= 0.0 {
                    button.update(ctx, false);
                }
            }
        }
    }
}

/// Two-axis continuous input with a radial dead zone.
pub struct Stick {
    speed: f64,
    threshold: f64,
    callback: StickCallback,
}

impl Stick {
    pub fn new(speed: f64, threshold: f64, callback: StickCallback) -> Self {
        Self {
            speed,
            threshold,
            callback,
        }
    }

    /// Invokes the callback only when the stick is outside its dead zone.
    pub fn update(&mut self, ctx: &mut ActionContext<'_>, x: f64, y: f64) {
        let (dx, dy) = apply_radial_deadzone(x, y, self.threshold);
        if dx.hypot(dy) > 0.0 {
            (self.callback)(ctx, self.speed * dx, self.speed * dy);
        }
    }
}
