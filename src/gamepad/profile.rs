//! The stock binding profile.
//!
//! | Input | Output |
//! |---|---|
//! | A / B | left / right click |
//! | X | Return |
//! | Y | on-screen keyboard |
//! | D-pad | arrow keys |
//! | left / right stick click | middle click / Control |
//! | left shoulder | Alt+Escape (switch windows) |
//! | right shoulder | Win+PrintScreen (screenshot) |
//! | left / right trigger | scroll up / down |
//! | left stick | cursor |
//! | right stick | scroll |
//! | Back + Start | toggle output (always live) |

use super::{AxisId, ButtonId, Gamepad, Layer, StickId};
use crate::action::{Action, AxisAction, DeviceEvent, StickAction};
use crate::config::AppConfig;
use crate::output::{Key, MouseButton};

/// Motor intensity while the enable chord is held.
pub const CHORD_RUMBLE: f64 = 0.15;

pub fn install_default(gamepad: &mut Gamepad, config: &AppConfig) {
    let profile = &config.profile;
    let layer = Layer::Enabled;

    gamepad
        .bind_button(layer, ButtonId::A, Action::MouseButton(MouseButton::Left))
        .bind_button(layer, ButtonId::B, Action::MouseButton(MouseButton::Right))
        .bind_button(layer, ButtonId::X, Action::Key(Key::RETURN))
        .bind_button(layer, ButtonId::Y, Action::OnScreenKeyboard)
        .bind_button(layer, ButtonId::DpadUp, Action::Key(Key::UP))
        .bind_button(layer, ButtonId::DpadDown, Action::Key(Key::DOWN))
        .bind_button(layer, ButtonId::DpadLeft, Action::Key(Key::LEFT))
        .bind_button(layer, ButtonId::DpadRight, Action::Key(Key::RIGHT))
        .bind_button(
            layer,
            ButtonId::ThumbLeft,
            Action::MouseButton(MouseButton::Middle),
        )
        .bind_button(layer, ButtonId::ThumbRight, Action::Key(Key::CONTROL))
        .bind_button(
            layer,
            ButtonId::ShoulderLeft,
            Action::Shortcut(vec![Key::MENU, Key::ESCAPE]),
        )
        .bind_button(
            layer,
            ButtonId::ShoulderRight,
            Action::Shortcut(vec![Key::LWIN, Key::SNAPSHOT]),
        )
        .bind_axis(
            layer,
            AxisId::LeftTrigger,
            profile.trigger_scroll_speed,
            profile.trigger_deadzone,
            AxisAction::ScrollY,
        )
        .bind_axis(
            layer,
            AxisId::RightTrigger,
            -profile.trigger_scroll_speed,
            profile.trigger_deadzone,
            AxisAction::ScrollY,
        )
        .bind_stick(
            layer,
            StickId::Left,
            profile.cursor_speed,
            profile.cursor_deadzone,
            StickAction::MoveCursor,
        )
        .bind_stick(
            layer,
            StickId::Right,
            profile.scroll_speed,
            profile.scroll_deadzone,
            StickAction::Scroll,
        );

    let mut toggle = vec![Action::Device(DeviceEvent::Toggle)];
    if config.vibration_feedback {
        toggle.push(Action::Rumble {
            left: CHORD_RUMBLE,
            right: CHORD_RUMBLE,
        });
    }
    gamepad
        .combination(Layer::Always)
        .button(ButtonId::Back)
        .button(ButtonId::Start)
        .build(Action::Chain(toggle));
}
