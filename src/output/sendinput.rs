//! `SendInput` backed injector.

use windows::Win32::UI::Input::KeyboardAndMouse::*;

use super::{InjectedEvent, InputInjector, Key, MouseButton};

/// Tag stored in `dwExtraInfo` of every event we synthesize.
pub const SIMULATED_EVENT_MARKER: usize = 0x4750;

/// Injects events into the desktop input stream.
#[derive(Debug, Default)]
pub struct SendInputInjector;

impl SendInputInjector {
    pub fn new() -> Self {
        Self
    }

    #[inline(always)]
    fn mouse_input(dx: i32, dy: i32, mouse_data: u32, flags: MOUSE_EVENT_FLAGS) -> INPUT {
        INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx,
                    dy,
                    mouseData: mouse_data,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: SIMULATED_EVENT_MARKER,
                },
            },
        }
    }

    #[inline(always)]
    fn key_input(key: Key, pressed: bool) -> INPUT {
        let mut flags = KEYBD_EVENT_FLAGS(0);
        if key.is_extended() {
            flags |= KEYEVENTF_EXTENDEDKEY;
        }
        if !pressed {
            flags |= KEYEVENTF_KEYUP;
        }
        INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(key.0),
                    wScan: 0,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: SIMULATED_EVENT_MARKER,
                },
            },
        }
    }

    #[inline(always)]
    fn button_input(button: MouseButton, pressed: bool) -> INPUT {
        let (down, up) = match button {
            MouseButton::Left => (MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP),
            MouseButton::Right => (MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP),
            MouseButton::Middle => (MOUSEEVENTF_MIDDLEDOWN, MOUSEEVENTF_MIDDLEUP),
            MouseButton::X1 | MouseButton::X2 => (MOUSEEVENTF_XDOWN, MOUSEEVENTF_XUP),
        };
        let mouse_data = match button {
            MouseButton::X1 => 1,
            MouseButton::X2 => 2,
            _ => 0,
        };
        Self::mouse_input(0, 0, mouse_data, if pressed { down } else { up })
    }
}

impl InputInjector for SendInputInjector {
    fn inject(&mut self, event: InjectedEvent) {
        let input = match event {
            InjectedEvent::MouseMove { dx, dy } => Self::mouse_input(dx, dy, 0, MOUSEEVENTF_MOVE),
            // mouseData carries the signed wheel delta reinterpreted as u32
            InjectedEvent::Wheel { delta } => {
                Self::mouse_input(0, 0, delta as u32, MOUSEEVENTF_WHEEL)
            }
            InjectedEvent::HorizontalWheel { delta } => {
                Self::mouse_input(0, 0, delta as u32, MOUSEEVENTF_HWHEEL)
            }
            InjectedEvent::MouseButton { button, pressed } => Self::button_input(button, pressed),
            InjectedEvent::Key { key, pressed } => Self::key_input(key, pressed),
        };

        unsafe {
            SendInput(&[input], std::mem::size_of::<INPUT>() as i32);
        }
    }
}
