use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::*;
use crate::action::{Action, StickAction, stick_callback};
use crate::config::AppConfig;
use crate::output::{InjectedEvent, Key, MouseButton, RecordingInjector};
use crate::test_support::{FakeSource, recording_outputs};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn pressed(buttons: &[ButtonId]) -> GamepadState {
    buttons
        .iter()
        .fold(GamepadState::default(), |state, &b| state.with_button(b, true))
}

fn left_down() -> InjectedEvent {
    InjectedEvent::MouseButton {
        button: MouseButton::Left,
        pressed: true,
    }
}

fn left_up() -> InjectedEvent {
    InjectedEvent::MouseButton {
        button: MouseButton::Left,
        pressed: false,
    }
}

struct Rig {
    gamepad: Gamepad,
    source: FakeSource,
    outputs: Outputs,
    recorder: RecordingInjector,
}

impl Rig {
    fn new(gamepad: Gamepad) -> Self {
        let (outputs, recorder, _) = recording_outputs();
        Self {
            gamepad,
            source: FakeSource::new(),
            outputs,
            recorder,
        }
    }

    fn with_click(enabled: bool) -> Self {
        let mut gamepad = Gamepad::new(0, enabled);
        gamepad.bind_button(
            Layer::Enabled,
            ButtonId::A,
            Action::MouseButton(MouseButton::Left),
        );
        Self::new(gamepad)
    }

    fn with_default_profile() -> Self {
        let mut gamepad = Gamepad::new(0, false);
        profile::install_default(&mut gamepad, &AppConfig::default());
        Self::new(gamepad)
    }

    fn tick(&mut self, now: Instant, state: Option<GamepadState>) {
        match state {
            Some(state) => self.source.set_state(0, state),
            None => self.source.disconnect(0),
        }
        self.gamepad
            .update_at(now, &mut self.source, &mut self.outputs);
    }
}

#[test]
fn test_first_successful_poll_connects() {
    let mut rig = Rig::with_click(true);
    assert_eq!(rig.gamepad.status(), DeviceStatus::Disconnected);

    rig.tick(Instant::now(), Some(GamepadState::default()));

    assert!(rig.gamepad.is_connected());
    assert!(rig.gamepad.is_ready());
    assert_eq!(rig.gamepad.status(), DeviceStatus::Enabled);
}

#[test]
fn test_button_edges_reach_sink() {
    let mut rig = Rig::with_click(true);
    let t0 = Instant::now();

    rig.tick(t0, Some(pressed(&[ButtonId::A])));
    rig.tick(t0 + ms(10), Some(pressed(&[ButtonId::A])));
    rig.tick(t0 + ms(20), Some(GamepadState::default()));

    assert_eq!(rig.recorder.take(), vec![left_down(), left_up()]);
}

#[test]
fn test_disconnect_releases_once_and_throttles() {
    let mut rig = Rig::with_click(true);
    let t0 = Instant::now();

    rig.tick(t0, Some(pressed(&[ButtonId::A])));
    rig.tick(t0 + ms(10), None);
    assert!(!rig.gamepad.is_connected());
    assert_eq!(rig.source.polls(0), 2);
    assert_eq!(rig.recorder.take(), vec![left_down(), left_up()]);

    rig.tick(t0 + ms(20), None);
    rig.tick(t0 + ms(259), None);
    assert_eq!(rig.source.polls(0), 2);

    rig.tick(t0 + ms(260), None);
    assert_eq!(rig.source.polls(0), 3);
    assert!(rig.recorder.take().is_empty());
}

#[test]
fn test_never_connected_slot_is_throttled() {
    let mut rig = Rig::with_click(true);
    let t0 = Instant::now();

    rig.tick(t0, None);
    rig.tick(t0 + ms(100), None);
    assert_eq!(rig.source.polls(0), 1);

    rig.tick(t0 + ms(250), Some(pressed(&[ButtonId::A])));
    assert_eq!(rig.source.polls(0), 2);
    assert!(rig.gamepad.is_connected());
    assert_eq!(rig.recorder.take(), vec![left_down()]);
}

#[test]
fn test_custom_reconnect_interval() {
    let mut rig = Rig::new(Gamepad::new(0, true).with_reconnect_interval(ms(50)));
    let t0 = Instant::now();

    rig.tick(t0, None);
    rig.tick(t0 + ms(49), None);
    rig.tick(t0 + ms(50), None);

    assert_eq!(rig.source.polls(0), 2);
}

#[test]
fn test_connected_device_polls_every_tick() {
    let mut rig = Rig::with_click(true);
    let t0 = Instant::now();

    for i in 0..5 {
        rig.tick(t0 + ms(i), Some(GamepadState::default()));
    }

    assert_eq!(rig.source.polls(0), 5);
}

#[test]
fn test_poll_failure_changes_nothing() {
    let mut rig = Rig::with_click(true);
    let t0 = Instant::now();

    rig.tick(t0, Some(pressed(&[ButtonId::A])));
    rig.recorder.take();

    rig.source.fail(0, 5);
    rig.gamepad
        .update_at(t0 + ms(10), &mut rig.source, &mut rig.outputs);

    assert!(rig.gamepad.is_connected());
    assert!(rig.recorder.take().is_empty());

    rig.tick(t0 + ms(20), Some(GamepadState::default()));
    assert_eq!(rig.recorder.take(), vec![left_up()]);
}

#[test]
fn test_disabled_device_ignores_enabled_layer() {
    let mut rig = Rig::with_click(false);
    let t0 = Instant::now();

    rig.tick(t0, Some(pressed(&[ButtonId::A])));
    rig.tick(t0 + ms(10), Some(GamepadState::default()));

    assert!(rig.recorder.take().is_empty());
    assert_eq!(rig.gamepad.status(), DeviceStatus::Disabled);
}

#[test]
fn test_disable_releases_held_button_once() {
    let mut rig = Rig::with_click(true);
    let t0 = Instant::now();

    rig.tick(t0, Some(pressed(&[ButtonId::A])));
    rig.gamepad.disable();

    rig.tick(t0 + ms(10), Some(pressed(&[ButtonId::A])));
    rig.tick(t0 + ms(20), Some(pressed(&[ButtonId::A])));
    assert_eq!(rig.recorder.take(), vec![left_down(), left_up()]);

    rig.gamepad.enable();
    rig.tick(t0 + ms(30), Some(pressed(&[ButtonId::A])));
    assert_eq!(rig.recorder.take(), vec![left_down()]);
}

#[test]
fn test_enable_chord_toggles_once() {
    let mut rig = Rig::with_default_profile();
    let t0 = Instant::now();
    let chord = pressed(&[ButtonId::Back, ButtonId::Start]);

    rig.tick(t0, Some(pressed(&[ButtonId::Back])));
    assert!(!rig.gamepad.is_enabled());

    rig.tick(t0 + ms(10), Some(chord));
    assert!(rig.gamepad.is_enabled());

    rig.tick(t0 + ms(20), Some(chord));
    assert!(rig.gamepad.is_enabled());

    rig.tick(t0 + ms(30), Some(pressed(&[ButtonId::Back])));
    assert!(rig.gamepad.is_enabled());

    rig.tick(t0 + ms(40), Some(chord));
    assert!(!rig.gamepad.is_enabled());
}

#[test]
fn test_enable_chord_rumbles_while_held() {
    let mut rig = Rig::with_default_profile();
    let t0 = Instant::now();
    let chord = pressed(&[ButtonId::Back, ButtonId::Start]);

    rig.tick(t0, Some(chord));
    rig.tick(t0 + ms(10), Some(chord));
    rig.tick(t0 + ms(20), Some(GamepadState::default()));

    assert_eq!(
        rig.source.vibrations(),
        vec![
            (0, profile::CHORD_RUMBLE, profile::CHORD_RUMBLE),
            (0, 0.0, 0.0)
        ]
    );
}

#[test]
fn test_enable_chord_without_vibration_feedback() {
    let mut gamepad = Gamepad::new(0, false);
    let config = AppConfig {
        vibration_feedback: false,
        ..AppConfig::default()
    };
    profile::install_default(&mut gamepad, &config);
    let mut rig = Rig::new(gamepad);

    rig.tick(Instant::now(), Some(pressed(&[ButtonId::Back, ButtonId::Start])));

    assert!(rig.gamepad.is_enabled());
    assert!(rig.source.vibrations().is_empty());
}

#[test]
fn test_chord_enable_applies_in_same_tick() {
    let mut rig = Rig::with_default_profile();

    rig.tick(
        Instant::now(),
        Some(pressed(&[ButtonId::Back, ButtonId::Start, ButtonId::A])),
    );

    assert_eq!(rig.recorder.take(), vec![left_down()]);
}

#[test]
fn test_chord_disable_releases_in_same_tick() {
    let mut rig = Rig::with_default_profile();
    rig.gamepad.enable();
    let t0 = Instant::now();

    rig.tick(t0, Some(pressed(&[ButtonId::A])));
    rig.tick(
        t0 + ms(10),
        Some(pressed(&[ButtonId::Back, ButtonId::Start, ButtonId::A])),
    );

    assert!(!rig.gamepad.is_enabled());
    assert_eq!(rig.recorder.take(), vec![left_down(), left_up()]);
}

#[test]
fn test_default_profile_keys() {
    let mut rig = Rig::with_default_profile();
    rig.gamepad.enable();
    let t0 = Instant::now();

    rig.tick(t0, Some(pressed(&[ButtonId::X, ButtonId::DpadLeft])));
    rig.tick(t0 + ms(10), Some(pressed(&[ButtonId::ShoulderLeft])));

    assert_eq!(
        rig.recorder.take(),
        vec![
            InjectedEvent::Key { key: Key::LEFT, pressed: true },
            InjectedEvent::Key { key: Key::RETURN, pressed: true },
            InjectedEvent::Key { key: Key::LEFT, pressed: false },
            InjectedEvent::Key { key: Key::MENU, pressed: true },
            InjectedEvent::Key { key: Key::ESCAPE, pressed: true },
            InjectedEvent::Key { key: Key::ESCAPE, pressed: false },
            InjectedEvent::Key { key: Key::MENU, pressed: false },
            InjectedEvent::Key { key: Key::RETURN, pressed: false },
        ]
    );
}

#[test]
fn test_triggers_scroll_in_opposite_directions() {
    let mut rig = Rig::with_default_profile();
    rig.gamepad.enable();
    let t0 = Instant::now();

    let left = GamepadState {
        left_trigger: 255,
        ..GamepadState::default()
    };
    let right = GamepadState {
        right_trigger: 255,
        ..GamepadState::default()
    };
    rig.tick(t0, Some(left));
    rig.tick(t0 + ms(10), Some(right));

    assert_eq!(
        rig.recorder.take(),
        vec![
            InjectedEvent::Wheel { delta: 10 },
            InjectedEvent::Wheel { delta: -10 },
        ]
    );
}

#[test]
fn test_left_stick_moves_cursor_up() {
    let mut rig = Rig::with_default_profile();
    rig.gamepad.enable();

    let up = GamepadState {
        thumb_ly: i16::MAX,
        ..GamepadState::default()
    };
    rig.tick(Instant::now(), Some(up));

    let events = rig.recorder.take();
    assert!(
        matches!(events[..], [InjectedEvent::MouseMove { dx: 0, dy }] if dy < 0),
        "{:?}",
        events
    );
}

#[test]
fn test_multiple_bindings_per_channel() {
    let mut gamepad = Gamepad::new(0, true);
    gamepad
        .bind_button(
            Layer::Enabled,
            ButtonId::B,
            Action::MouseButton(MouseButton::Right),
        )
        .bind_button(Layer::Enabled, ButtonId::B, Action::Key(Key::SHIFT));
    let mut rig = Rig::new(gamepad);

    rig.tick(Instant::now(), Some(pressed(&[ButtonId::B])));

    assert_eq!(
        rig.recorder.take(),
        vec![
            InjectedEvent::MouseButton {
                button: MouseButton::Right,
                pressed: true
            },
            InjectedEvent::Key {
                key: Key::SHIFT,
                pressed: true
            },
        ]
    );
}

#[test]
fn test_axis_button_combination() {
    let mut gamepad = Gamepad::new(0, true);
    let combination = gamepad
        .combination(Layer::Enabled)
        .button(ButtonId::ShoulderLeft)
        .axis_button(
            AxisId::LeftTrigger,
            DEFAULT_PRESS_THRESHOLD,
            DEFAULT_RELEASE_THRESHOLD,
        )
        .build(Action::Key(Key::TAB));
    let mut rig = Rig::new(gamepad);
    let t0 = Instant::now();

    let shoulder = pressed(&[ButtonId::ShoulderLeft]);
    let both = GamepadState {
        left_trigger: 200,
        ..shoulder
    };
    let half = GamepadState {
        left_trigger: 100,
        ..shoulder
    };

    rig.tick(t0, Some(shoulder));
    assert!(rig.recorder.take().is_empty());

    rig.tick(t0 + ms(10), Some(both));
    assert!(combination.is_active());

    // 100/255 sits inside the hysteresis band
    rig.tick(t0 + ms(20), Some(half));
    rig.tick(t0 + ms(30), Some(shoulder));

    assert_eq!(
        rig.recorder.take(),
        vec![
            InjectedEvent::Key { key: Key::TAB, pressed: true },
            InjectedEvent::Key { key: Key::TAB, pressed: false },
        ]
    );
    assert!(!combination.is_active());
}

#[test]
fn test_stick_callback_gets_scaled_vector() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = calls.clone();
    let mut gamepad = Gamepad::new(0, true);
    gamepad.bind_stick(
        Layer::Enabled,
        StickId::Right,
        2.0,
        0.0,
        StickAction::Custom(stick_callback(move |_, x, y| {
            sink.lock().unwrap().push((x, y))
        })),
    );
    let mut rig = Rig::new(gamepad);

    let right = GamepadState {
        thumb_rx: i16::MAX,
        ..GamepadState::default()
    };
    rig.tick(Instant::now(), Some(right));

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!((calls[0].0 - 2.0).abs() < 1e-3);
}

#[test]
fn test_release_all_releases_held_inputs() {
    let mut rig = Rig::with_default_profile();
    rig.gamepad.enable();

    rig.tick(Instant::now(), Some(pressed(&[ButtonId::A, ButtonId::Back])));
    rig.recorder.take();

    rig.gamepad.release_all(&mut rig.source, &mut rig.outputs);

    assert!(!rig.gamepad.is_enabled());
    assert_eq!(rig.recorder.take(), vec![left_up()]);
    assert_eq!(rig.source.vibrations(), vec![(0, 0.0, 0.0)]);
}

#[test]
fn test_release_all_with_chord_held_stops_rumble() {
    let mut rig = Rig::with_default_profile();

    rig.tick(Instant::now(), Some(pressed(&[ButtonId::Back, ButtonId::Start])));
    assert!(rig.gamepad.is_enabled());

    rig.gamepad.release_all(&mut rig.source, &mut rig.outputs);

    assert!(!rig.gamepad.is_enabled());
    assert_eq!(
        rig.source.vibrations(),
        vec![
            (0, profile::CHORD_RUMBLE, profile::CHORD_RUMBLE),
            (0, 0.0, 0.0)
        ]
    );
}
