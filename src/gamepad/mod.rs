//! Controller devices and their binding tables.
//!
//! A [`Gamepad`] polls one physical slot per tick, normalizes the state and
//! feeds it through two binding layers:
//!
//! - [`Layer::Always`] sees every tick, including while output is disabled,
//!   so the enable chord keeps working.
//! - [`Layer::Enabled`] sees real input only while enabled. When the device
//!   becomes disabled it gets one neutral snapshot so held inputs release
//!   cleanly, then nothing until re-enabled.

pub mod binding;
pub mod combination;
pub mod profile;
pub mod state;

#[cfg(test)]
mod tests;

use std::fmt;
use std::time::{Duration, Instant};

use smallvec::SmallVec;
use tracing::{info, warn};

use crate::action::{
    Action, ActionContext, AxisAction, Callback, DeviceControl, StickAction,
};
use crate::error::PollError;
use crate::registry::Outputs;
use crate::source::ControllerSource;

pub use binding::{
    Axis, Button, DEFAULT_AXIS_THRESHOLD, DEFAULT_PRESS_THRESHOLD, DEFAULT_RELEASE_THRESHOLD,
    Stick, apply_radial_deadzone,
};
pub use combination::{Combination, CombinationBuilder};
pub use state::{AxisId, ButtonId, GamepadState, Snapshot, StickId};

/// Minimum time between polls of a disconnected slot.
pub const RECONNECT_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Always,
    Enabled,
}

impl Layer {
    #[inline(always)]
    const fn index(self) -> usize {
        match self {
            Layer::Always => 0,
            Layer::Enabled => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceStatus {
    Disconnected,
    Disabled,
    Enabled,
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceStatus::Disconnected => "disconnected",
            DeviceStatus::Disabled => "disabled",
            DeviceStatus::Enabled => "enabled",
        };
        f.write_str(name)
    }
}

/// Bindings of one layer, a list per input channel.
struct BindingSet {
    buttons: [SmallVec<[Button; 2]>; ButtonId::COUNT],
    axes: [SmallVec<[Axis; 2]>; AxisId::COUNT],
    sticks: [SmallVec<[Stick; 1]>; StickId::COUNT],
}

impl BindingSet {
    fn new() -> Self {
        Self {
            buttons: std::array::from_fn(|_| SmallVec::new()),
            axes: std::array::from_fn(|_| SmallVec::new()),
            sticks: std::array::from_fn(|_| SmallVec::new()),
        }
    }

    fn len(&self) -> usize {
        self.buttons.iter().map(SmallVec::len).sum::<usize>()
            + self.axes.iter().map(SmallVec::len).sum::<usize>()
            + self.sticks.iter().map(SmallVec::len).sum::<usize>()
    }

    fn dispatch(&mut self, ctx: &mut ActionContext<'_>, snapshot: &Snapshot) {
        for id in ButtonId::ALL {
            let pressed = snapshot.button(id);
            for button in self.buttons[id.index()].iter_mut() {
                button.update(ctx, pressed);
            }
        }
        for id in AxisId::ALL {
            let value = snapshot.axis(id);
            for axis in self.axes[id.index()].iter_mut() {
                axis.update(ctx, value);
            }
        }
        for id in StickId::ALL {
            let (x, y) = snapshot.stick(id);
            for stick in self.sticks[id.index()].iter_mut() {
                stick.update(ctx, x, y);
            }
        }
    }
}

/// One controller slot.
pub struct Gamepad {
    control: DeviceControl,
    connected: bool,
    last_poll: Option<Instant>,
    reconnect_interval: Duration,
    layers: [BindingSet; 2],
    // Set once the enabled layer has seen a neutral snapshot since the
    // last time it saw real input.
    enabled_layer_neutral: bool,
}

impl Gamepad {
    /// Creates a disconnected device with no bindings.
    pub fn new(index: usize, enabled: bool) -> Self {
        Self {
            control: DeviceControl::new(index, enabled),
            connected: false,
            last_poll: None,
            reconnect_interval: RECONNECT_INTERVAL,
            layers: [BindingSet::new(), BindingSet::new()],
            enabled_layer_neutral: true,
        }
    }

    pub fn with_reconnect_interval(mut self, interval: Duration) -> Self {
        self.reconnect_interval = interval;
        self
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.control.index()
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.control.is_enabled()
    }

    /// Connected and producing output.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.connected && self.control.is_enabled()
    }

    pub fn status(&self) -> DeviceStatus {
        match (self.connected, self.control.is_enabled()) {
            (false, _) => DeviceStatus::Disconnected,
            (true, false) => DeviceStatus::Disabled,
            (true, true) => DeviceStatus::Enabled,
        }
    }

    /// Number of bindings registered in `layer`.
    pub fn binding_count(&self, layer: Layer) -> usize {
        self.layers[layer.index()].len()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        let was_enabled = self.control.is_enabled();
        self.control.set_enabled(enabled);
        self.log_enable_change(was_enabled);
    }

    pub fn enable(&mut self) {
        self.set_enabled(true);
    }

    pub fn disable(&mut self) {
        self.set_enabled(false);
    }

    pub fn toggle(&mut self) {
        self.set_enabled(!self.control.is_enabled());
    }

    fn log_enable_change(&self, was_enabled: bool) {
        match (was_enabled, self.control.is_enabled()) {
            (false, true) => info!("Controller {} enabled", self.index()),
            (true, false) => info!("Controller {} disabled", self.index()),
            _ => {}
        }
    }

    pub fn bind_button(&mut self, layer: Layer, id: ButtonId, action: Action) -> &mut Self {
        let (press, release) = action.into_handlers();
        self.bind_button_with(layer, id, Some(press), Some(release))
    }

    pub fn bind_button_with(
        &mut self,
        layer: Layer,
        id: ButtonId,
        press: Option<Callback>,
        release: Option<Callback>,
    ) -> &mut Self {
        self.layers[layer.index()].buttons[id.index()].push(Button::new(press, release));
        self
    }

    /// Binds a continuous axis; the action receives `speed * deadzoned(value)`
    /// every tick.
    pub fn bind_axis(
        &mut self,
        layer: Layer,
        id: AxisId,
        speed: f64,
        threshold: f64,
        action: AxisAction,
    ) -> &mut Self {
        let axis = Axis::continuous(speed, threshold, action.into_callback());
        self.layers[layer.index()].axes[id.index()].push(axis);
        self
    }

    /// Binds an axis as a button with hysteresis.
    pub fn bind_axis_button(
        &mut self,
        layer: Layer,
        id: AxisId,
        press_threshold: f64,
        release_threshold: f64,
        action: Action,
    ) -> &mut Self {
        let (press, release) = action.into_handlers();
        self.bind_axis_button_with(
            layer,
            id,
            press_threshold,
            release_threshold,
            Some(press),
            Some(release),
        )
    }

    pub fn bind_axis_button_with(
        &mut self,
        layer: Layer,
        id: AxisId,
        press_threshold: f64,
        release_threshold: f64,
        press: Option<Callback>,
        release: Option<Callback>,
    ) -> &mut Self {
        let axis = Axis::threshold(press_threshold, release_threshold, press, release);
        self.layers[layer.index()].axes[id.index()].push(axis);
        self
    }

    pub fn bind_stick(
        &mut self,
        layer: Layer,
        id: StickId,
        speed: f64,
        threshold: f64,
        action: StickAction,
    ) -> &mut Self {
        let stick = Stick::new(speed, threshold, action.into_callback());
        self.layers[layer.index()].sticks[id.index()].push(stick);
        self
    }

    /// Starts a chord whose members are bound into `layer`.
    pub fn combination(&mut self, layer: Layer) -> CombinationBuilder<'_> {
        CombinationBuilder::new(self, layer)
    }

    pub fn update(&mut self, source: &mut dyn ControllerSource, outputs: &mut Outputs) {
        self.update_at(Instant::now(), source, outputs);
    }

    /// Runs one tick as if the current time were `now`.
    pub fn update_at(
        &mut self,
        now: Instant,
        source: &mut dyn ControllerSource,
        outputs: &mut Outputs,
    ) {
        if !self.connected
            && let Some(last_poll) = self.last_poll
            && now.saturating_duration_since(last_poll) < self.reconnect_interval
        {
            return;
        }
        self.last_poll = Some(now);

        let raw = match source.poll(self.index()) {
            Ok(raw) => {
                if !self.connected {
                    self.connected = true;
                    info!("Controller {} connected", self.index());
                }
                raw
            }
            Err(PollError::NotConnected) => {
                if !self.connected {
                    return;
                }
                self.connected = false;
                info!("Controller {} disconnected", self.index());
                GamepadState::default()
            }
            Err(PollError::Failed(code)) => {
                warn!("Polling controller {} failed with code {}", self.index(), code);
                return;
            }
        };

        self.dispatch(&Snapshot::from_raw(&raw), outputs);

        if let Some((left, right)) = self.control.take_rumble() {
            source.set_vibration(self.index(), left, right);
        }
    }

    fn dispatch(&mut self, snapshot: &Snapshot, outputs: &mut Outputs) {
        let was_enabled = self.control.is_enabled();

        let mut ctx = ActionContext::new(outputs, &mut self.control);
        self.layers[Layer::Always.index()].dispatch(&mut ctx, snapshot);

        if ctx.device.is_enabled() {
            self.layers[Layer::Enabled.index()].dispatch(&mut ctx, snapshot);
            self.enabled_layer_neutral = false;
        } else if !self.enabled_layer_neutral {
            let neutral = Snapshot::from_raw(&GamepadState::default());
            self.layers[Layer::Enabled.index()].dispatch(&mut ctx, &neutral);
            self.enabled_layer_neutral = true;
        }

        self.log_enable_change(was_enabled);
    }

    /// Releases everything held by either layer, disables output and stops
    /// the motors.
    pub fn release_all(&mut self, source: &mut dyn ControllerSource, outputs: &mut Outputs) {
        let neutral = Snapshot::from_raw(&GamepadState::default());
        let mut ctx = ActionContext::new(outputs, &mut self.control);
        for layer in self.layers.iter_mut() {
            layer.dispatch(&mut ctx, &neutral);
        }
        self.enabled_layer_neutral = true;

        self.disable();
        self.control.take_rumble();
        if self.connected {
            source.set_vibration(self.index(), 0.0, 0.0);
        }
    }
}

impl fmt::Debug for Gamepad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gamepad")
            .field("index", &self.index())
            .field("status", &self.status())
            .field("always_bindings", &self.binding_count(Layer::Always))
            .field("enabled_bindings", &self.binding_count(Layer::Enabled))
            .finish()
    }
}
