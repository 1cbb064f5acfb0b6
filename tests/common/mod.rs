//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use gamepad_mouse::output::RecordingInjector;
use gamepad_mouse::{
    ButtonId, ControllerSource, GamepadState, MAX_DEVICES, OnScreenKeyboard, OutputSink, Outputs,
    PollError,
};

struct ScriptedState {
    slots: [Result<GamepadState, PollError>; MAX_DEVICES],
    polls: [usize; MAX_DEVICES],
    vibrations: Vec<(usize, f64, f64)>,
}

/// Controller source whose slots are set by the test. Clones share state.
#[derive(Clone)]
pub struct ScriptedSource {
    state: Arc<Mutex<ScriptedState>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptedState {
                slots: [Err(PollError::NotConnected); MAX_DEVICES],
                polls: [0; MAX_DEVICES],
                vibrations: Vec::new(),
            })),
        }
    }

    pub fn set(&self, index: usize, state: GamepadState) {
        self.state.lock().unwrap().slots[index] = Ok(state);
    }

    pub fn unplug(&self, index: usize) {
        self.state.lock().unwrap().slots[index] = Err(PollError::NotConnected);
    }

    pub fn polls(&self, index: usize) -> usize {
        self.state.lock().unwrap().polls[index]
    }

    pub fn vibrations(&self) -> Vec<(usize, f64, f64)> {
        self.state.lock().unwrap().vibrations.clone()
    }
}

impl ControllerSource for ScriptedSource {
    fn poll(&mut self, index: usize) -> Result<GamepadState, PollError> {
        let mut state = self.state.lock().unwrap();
        state.polls[index] += 1;
        state.slots[index]
    }

    fn set_vibration(&mut self, index: usize, left: f64, right: f64) {
        self.state
            .lock()
            .unwrap()
            .vibrations
            .push((index, left, right));
    }
}

/// Outputs recording every injected event; the on-screen keyboard never opens.
pub fn recording_outputs() -> (Outputs, RecordingInjector) {
    let recorder = RecordingInjector::new();
    let outputs = Outputs::new(
        OutputSink::new(Box::new(recorder.clone())),
        OnScreenKeyboard::default(),
    );
    (outputs, recorder)
}

pub fn pressed(buttons: &[ButtonId]) -> GamepadState {
    buttons
        .iter()
        .fold(GamepadState::default(), |state, &b| state.with_button(b, true))
}

/// Stick pushed to normalized `(x, y)`.
pub fn left_stick(x: f64, y: f64) -> GamepadState {
    GamepadState {
        thumb_lx: raw_axis(x),
        thumb_ly: raw_axis(y),
        ..GamepadState::default()
    }
}

/// Inverse of the signed normalization, rounded to the nearest raw value.
pub fn raw_axis(value: f64) -> i16 {
    let min = i16::MIN as f64;
    let max = i16::MAX as f64;
    ((value + 1.0) / 2.0 * (max - min) + min).round() as i16
}
