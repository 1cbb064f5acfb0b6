//! Fakes shared by the unit tests.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::PollError;
use crate::gamepad::GamepadState;
use crate::keyboard::{HelperLauncher, HelperProcess, OnScreenKeyboard};
use crate::output::{OutputSink, RecordingInjector};
use crate::registry::{MAX_DEVICES, Outputs};
use crate::source::ControllerSource;

struct FakeSourceState {
    slots: [Result<GamepadState, PollError>; MAX_DEVICES],
    polls: [usize; MAX_DEVICES],
    vibrations: Vec<(usize, f64, f64)>,
}

/// Controller source driven by the test. Clones share state.
#[derive(Clone)]
pub struct FakeSource {
    state: Arc<Mutex<FakeSourceState>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeSourceState {
                slots: [Err(PollError::NotConnected); MAX_DEVICES],
                polls: [0; MAX_DEVICES],
                vibrations: Vec::new(),
            })),
        }
    }

    pub fn connect(&self, index: usize) {
        self.set_state(index, GamepadState::default());
    }

    pub fn disconnect(&self, index: usize) {
        self.state.lock().unwrap().slots[index] = Err(PollError::NotConnected);
    }

    pub fn fail(&self, index: usize, code: u32) {
        self.state.lock().unwrap().slots[index] = Err(PollError::Failed(code));
    }

    pub fn set_state(&self, index: usize, state: GamepadState) {
        self.state.lock().unwrap().slots[index] = Ok(state);
    }

    pub fn polls(&self, index: usize) -> usize {
        self.state.lock().unwrap().polls[index]
    }

    pub fn vibrations(&self) -> Vec<(usize, f64, f64)> {
        self.state.lock().unwrap().vibrations.clone()
    }
}

impl ControllerSource for FakeSource {
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

#[derive(Default)]
struct LauncherState {
    launches: usize,
    terminations: usize,
    fail: bool,
    alive: Vec<Arc<AtomicBool>>,
}

/// Helper launcher that hands out fake processes.
#[derive(Clone, Default)]
pub struct MockLauncher {
    state: Arc<Mutex<LauncherState>>,
}

impl MockLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn launches(&self) -> usize {
        self.state.lock().unwrap().launches
    }

    pub fn terminations(&self) -> usize {
        self.state.lock().unwrap().terminations
    }

    pub fn fail_next(&self, fail: bool) {
        self.state.lock().unwrap().fail = fail;
    }

    /// Simulates every launched process exiting on its own.
    pub fn exit_all(&self) {
        for alive in &self.state.lock().unwrap().alive {
            alive.store(false, Ordering::SeqCst);
        }
    }
}

struct MockProcess {
    alive: Arc<AtomicBool>,
    launcher: Arc<Mutex<LauncherState>>,
}

impl HelperProcess for MockProcess {
    fn is_running(&mut self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    fn terminate(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
        self.launcher.lock().unwrap().terminations += 1;
    }
}

impl HelperLauncher for MockLauncher {
    fn launch(&mut self) -> io::Result<Box<dyn HelperProcess>> {
        let mut state = self.state.lock().unwrap();
        if state.fail {
            return Err(io::Error::other("launch refused"));
        }
        state.launches += 1;
        let alive = Arc::new(AtomicBool::new(true));
        state.alive.push(alive.clone());
        Ok(Box::new(MockProcess {
            alive,
            launcher: self.state.clone(),
        }))
    }
}

/// Outputs that record injected events and use a mock keyboard launcher.
pub fn recording_outputs() -> (Outputs, RecordingInjector, MockLauncher) {
    let recorder = RecordingInjector::new();
    let launcher = MockLauncher::new();
    let outputs = Outputs::new(
        OutputSink::new(Box::new(recorder.clone())),
        OnScreenKeyboard::new(Box::new(launcher.clone())),
    );
    (outputs, recorder, launcher)
}
