//! Key, mouse button and wheel identifiers used by synthetic output.

use std::fmt;

/// Wheel distance of one notch, in the units the platform expects.
pub const WHEEL_DELTA: f64 = 120.0;

/// A virtual-key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(pub u16);

impl Key {
    pub const BACK: Key = Key(0x08);
    pub const TAB: Key = Key(0x09);
    pub const RETURN: Key = Key(0x0D);
    pub const SHIFT: Key = Key(0x10);
    pub const CONTROL: Key = Key(0x11);
    pub const MENU: Key = Key(0x12);
    pub const PAUSE: Key = Key(0x13);
    pub const CAPITAL: Key = Key(0x14);
    pub const ESCAPE: Key = Key(0x1B);
    pub const SPACE: Key = Key(0x20);
    pub const PRIOR: Key = Key(0x21);
    pub const NEXT: Key = Key(0x22);
    pub const END: Key = Key(0x23);
    pub const HOME: Key = Key(0x24);
    pub const LEFT: Key = Key(0x25);
    pub const UP: Key = Key(0x26);
    pub const RIGHT: Key = Key(0x27);
    pub const DOWN: Key = Key(0x28);
    pub const SNAPSHOT: Key = Key(0x2C);
    pub const INSERT: Key = Key(0x2D);
    pub const DELETE: Key = Key(0x2E);
    pub const LWIN: Key = Key(0x5B);
    pub const RWIN: Key = Key(0x5C);
    pub const APPS: Key = Key(0x5D);
    pub const DIVIDE: Key = Key(0x6F);
    pub const NUMLOCK: Key = Key(0x90);
    pub const LSHIFT: Key = Key(0xA0);
    pub const RSHIFT: Key = Key(0xA1);
    pub const LCONTROL: Key = Key(0xA2);
    pub const RCONTROL: Key = Key(0xA3);
    pub const LMENU: Key = Key(0xA4);
    pub const RMENU: Key = Key(0xA5);

    /// Letter or digit key from its ASCII character.
    pub fn from_char(c: char) -> Option<Key> {
        let c = c.to_ascii_uppercase();
        if c.is_ascii_uppercase() || c.is_ascii_digit() {
            Some(Key(c as u16))
        } else {
            None
        }
    }

    /// Function key `F1`..=`F24`.
    pub fn function(n: u16) -> Option<Key> {
        (1..=24).contains(&n).then(|| Key(0x70 + n - 1))
    }

    /// Keys that need the extended-key flag when injected.
    #[inline(always)]
    pub fn is_extended(self) -> bool {
        matches!(
            self,
            Key::PRIOR
                | Key::NEXT
                | Key::END
                | Key::HOME
                | Key::LEFT
                | Key::UP
                | Key::RIGHT
                | Key::DOWN
                | Key::SNAPSHOT
                | Key::INSERT
                | Key::DELETE
                | Key::LWIN
                | Key::RWIN
                | Key::APPS
                | Key::DIVIDE
                | Key::NUMLOCK
                | Key::RCONTROL
                | Key::RMENU
        )
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vk = self.0;
        match vk {
            0x41..=0x5A | 0x30..=0x39 => write!(f, "{}", vk as u8 as char),
            0x60..=0x69 => write!(f, "NUMPAD{}", vk - 0x60),
            0x70..=0x87 => write!(f, "F{}", vk - 0x70 + 1),
            _ => {
                let name = match *self {
                    Key::BACK => "BACK",
                    Key::TAB => "TAB",
                    Key::RETURN => "RETURN",
                    Key::SHIFT => "SHIFT",
                    Key::CONTROL => "CTRL",
                    Key::MENU => "ALT",
                    Key::PAUSE => "PAUSE",
                    Key::CAPITAL => "CAPITAL",
                    Key::ESCAPE => "ESCAPE",
                    Key::SPACE => "SPACE",
                    Key::PRIOR => "PAGEUP",
                    Key::NEXT => "PAGEDOWN",
                    Key::END => "END",
                    Key::HOME => "HOME",
                    Key::LEFT => "LEFT",
                    Key::UP => "UP",
                    Key::RIGHT => "RIGHT",
                    Key::DOWN => "DOWN",
                    Key::SNAPSHOT => "SNAPSHOT",
                    Key::INSERT => "INSERT",
                    Key::DELETE => "DELETE",
                    Key::LWIN => "LWIN",
                    Key::RWIN => "RWIN",
                    Key::APPS => "APPS",
                    Key::DIVIDE => "DIVIDE",
                    Key::NUMLOCK => "NUMLOCK",
                    Key::LSHIFT => "LSHIFT",
                    Key::RSHIFT => "RSHIFT",
                    Key::LCONTROL => "LCTRL",
                    Key::RCONTROL => "RCTRL",
                    Key::LMENU => "LALT",
                    Key::RMENU => "RALT",
                    _ => return write!(f, "VK_{:02X}", vk),
                };
                f.write_str(name)
            }
        }
    }
}

/// Mouse buttons that can be pressed synthetically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    X1,
    X2,
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MouseButton::Left => "LBUTTON",
            MouseButton::Middle => "MBUTTON",
            MouseButton::Right => "RBUTTON",
            MouseButton::X1 => "XBUTTON1",
            MouseButton::X2 => "XBUTTON2",
        };
        f.write_str(name)
    }
}

/// One wheel notch in a fixed direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollStep {
    Left,
    Right,
    Up,
    Down,
}

impl ScrollStep {
    /// Horizontal and vertical wheel deltas for this step.
    pub fn delta(self) -> (f64, f64) {
        match self {
            ScrollStep::Left => (-WHEEL_DELTA, 0.0),
            ScrollStep::Right => (WHEEL_DELTA, 0.0),
            ScrollStep::Up => (0.0, WHEEL_DELTA),
            ScrollStep::Down => (0.0, -WHEEL_DELTA),
        }
    }
}
