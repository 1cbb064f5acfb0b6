//! Controller input seam.

use crate::error::PollError;
use crate::gamepad::GamepadState;

/// Where raw controller state comes from.
///
/// `index` is the physical slot, `0..MAX_DEVICES`.
pub trait ControllerSource: Send {
    /// Reads the current state of one slot.
    fn poll(&mut self, index: usize) -> Result<GamepadState, PollError>;

    /// Sets motor intensities, each in `[0, 1]`. Best effort.
    fn set_vibration(&mut self, index: usize, left: f64, right: f64);
}
