//! Raw and normalized controller state.

/// Controller state as read from the platform, one per device per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GamepadState {
    pub buttons: u16,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub thumb_lx: i16,
    pub thumb_ly: i16,
    pub thumb_rx: i16,
    pub thumb_ry: i16,
}

impl GamepadState {
    /// Sets or clears one button bit.
    pub fn with_button(mut self, button: ButtonId, pressed: bool) -> Self {
        if pressed {
            self.buttons |= button.mask();
        } else {
            self.buttons &= !button.mask();
        }
        self
    }

    #[inline]
    pub fn is_pressed(&self, button: ButtonId) -> bool {
        self.buttons & button.mask() != 0
    }
}

/// Digital buttons in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    Start,
    Back,
    ThumbLeft,
    ThumbRight,
    ShoulderLeft,
    ShoulderRight,
    A,
    B,
    X,
    Y,
}

impl ButtonId {
    pub const COUNT: usize = 14;

    pub const ALL: [ButtonId; Self::COUNT] = [
        ButtonId::DpadUp,
        ButtonId::DpadDown,
        ButtonId::DpadLeft,
        ButtonId::DpadRight,
        ButtonId::Start,
        ButtonId::Back,
        ButtonId::ThumbLeft,
        ButtonId::ThumbRight,
        ButtonId::ShoulderLeft,
        ButtonId::ShoulderRight,
        ButtonId::A,
        ButtonId::B,
        ButtonId::X,
        ButtonId::Y,
    ];

    /// Bit in [`GamepadState::buttons`].
    #[inline(always)]
    pub const fn mask(self) -> u16 {
        match self {
            ButtonId::DpadUp => 0x0001,
            ButtonId::DpadDown => 0x0002,
            ButtonId::DpadLeft => 0x0004,
            ButtonId::DpadRight => 0x0008,
            ButtonId::Start => 0x0010,
            ButtonId::Back => 0x0020,
            ButtonId::ThumbLeft => 0x0040,
            ButtonId::ThumbRight => 0x0080,
            ButtonId::ShoulderLeft => 0x0100,
            ButtonId::ShoulderRight => 0x0200,
            ButtonId::A => 0x1000,
            ButtonId::B => 0x2000,
            ButtonId::X => 0x4000,
            ButtonId::Y => 0x8000,
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisId {
    LeftTrigger,
    RightTrigger,
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
}

impl AxisId {
    pub const COUNT: usize = 6;

    pub const ALL: [AxisId; Self::COUNT] = [
        AxisId::LeftTrigger,
        AxisId::RightTrigger,
        AxisId::LeftStickX,
        AxisId::LeftStickY,
        AxisId::RightStickX,
        AxisId::RightStickY,
    ];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickId {
    Left,
    Right,
}

impl StickId {
    pub const COUNT: usize = 2;

    pub const ALL: [StickId; Self::COUNT] = [StickId::Left, StickId::Right];

    /// The (x, y) axes making up this stick.
    pub const fn axes(self) -> (AxisId, AxisId) {
        match self {
            StickId::Left => (AxisId::LeftStickX, AxisId::LeftStickY),
            StickId::Right => (AxisId::RightStickX, AxisId::RightStickY),
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Maps the full `i16` range linearly onto `[-1, 1]`.
#[inline]
pub fn normalize_signed(value: i16) -> f64 {
    let min = i16::MIN as f64;
    let max = i16::MAX as f64;
    2.0 * (value as f64 - min) / (max - min) - 1.0
}

/// Maps the full `u8` range linearly onto `[0, 1]`.
#[inline]
pub fn normalize_unsigned(value: u8) -> f64 {
    value as f64 / u8::MAX as f64
}

/// Normalized view of one [`GamepadState`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Snapshot {
    pub buttons: [bool; ButtonId::COUNT],
    pub axes: [f64; AxisId::COUNT],
}

impl Snapshot {
    pub fn from_raw(raw: &GamepadState) -> Self {
        let buttons = ButtonId::ALL.map(|button| raw.is_pressed(button));
        let axes = [
            normalize_unsigned(raw.left_trigger),
            normalize_unsigned(raw.right_trigger),
            normalize_signed(raw.thumb_lx),
            normalize_signed(raw.thumb_ly),
            normalize_signed(raw.thumb_rx),
            normalize_signed(raw.thumb_ry),
        ];
        Self { buttons, axes }
    }

    #[inline]
    pub fn button(&self, id: ButtonId) -> bool {
        self.buttons[id.index()]
    }

    #[inline]
    pub fn axis(&self, id: AxisId) -> f64 {
        self.axes[id.index()]
    }

    #[inline]
    pub fn stick(&self, id: StickId) -> (f64, f64) {
        let (x, y) = id.axes();
        (self.axis(x), self.axis(y))
    }
}
