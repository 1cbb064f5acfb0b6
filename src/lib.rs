//! Gamepad to mouse and keyboard mapping engine.
//!
//! Polls up to four controllers on a background thread and turns their
//! buttons, triggers and sticks into synthetic pointer and key events through
//! a declarative binding table.

pub mod action;
pub mod config;
pub mod driver;
pub mod error;
pub mod gamepad;
pub mod keyboard;
pub mod output;
pub mod registry;
#[cfg(windows)]
pub mod signal;
pub mod source;
#[cfg(windows)]
pub mod xinput;

#[cfg(test)]
mod test_support;

pub use action::{Action, ActionContext, AxisAction, DeviceControl, DeviceEvent, StickAction};
pub use config::{AppConfig, ProfileConfig};
pub use driver::Driver;
pub use error::{EngineError, PollError, Result};
pub use gamepad::{
    AxisId, ButtonId, Combination, DeviceStatus, Gamepad, GamepadState, Layer, StickId,
};
pub use keyboard::OnScreenKeyboard;
pub use output::{InjectedEvent, InputInjector, Key, MouseButton, OutputSink, ScrollStep};
pub use registry::{MAX_DEVICES, Outputs, Registry};
pub use source::ControllerSource;
