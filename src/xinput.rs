//! XInput backed controller source.
//!
//! Supports Xbox 360, Xbox One and Xbox Series controllers in the four
//! XInput user slots.

use tracing::trace;
use windows::Win32::Foundation::ERROR_DEVICE_NOT_CONNECTED;
use windows::Win32::UI::Input::XboxController::*;

use crate::error::PollError;
use crate::gamepad::GamepadState;
use crate::source::ControllerSource;

#[derive(Debug, Default)]
pub struct XInputSource;

impl XInputSource {
    pub fn new() -> Self {
        Self
    }

    #[inline(always)]
    fn motor_speed(intensity: f64) -> u16 {
        (intensity.clamp(0.0, 1.0) * u16::MAX as f64) as u16
    }
}

impl ControllerSource for XInputSource {
    fn poll(&mut self, index: usize) -> Result<GamepadState, PollError> {
        let mut state = XINPUT_STATE::default();

        match unsafe { XInputGetState(index as u32, &mut state) } {
            0 => {
                let gamepad = state.Gamepad;
                Ok(GamepadState {
                    buttons: gamepad.wButtons.0,
                    left_trigger: gamepad.bLeftTrigger,
                    right_trigger: gamepad.bRightTrigger,
                    thumb_lx: gamepad.sThumbLX,
                    thumb_ly: gamepad.sThumbLY,
                    thumb_rx: gamepad.sThumbRX,
                    thumb_ry: gamepad.sThumbRY,
                })
            }
            code if code == ERROR_DEVICE_NOT_CONNECTED.0 => Err(PollError::NotConnected),
            code => Err(PollError::Failed(code)),
        }
    }

    fn set_vibration(&mut self, index: usize, left: f64, right: f64) {
        let vibration = XINPUT_VIBRATION {
            wLeftMotorSpeed: Self::motor_speed(left),
            wRightMotorSpeed: Self::motor_speed(right),
        };

        let result = unsafe { XInputSetState(index as u32, &vibration) };
        if result != 0 {
            trace!("XInputSetState({}) failed with code {}", index, result);
        }
    }
}
