//! Chorded inputs.
//!
//! A [`Combination`] counts how many of its members are held. Its action
//! presses when the last member goes down and releases when the first one
//! comes back up.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{Gamepad, Layer};
use super::state::{AxisId, ButtonId};
use crate::action::{Action, Callback, callback};

struct CombinationState {
    count: usize,
    counter: usize,
    press: Option<Callback>,
    release: Option<Callback>,
}

/// Handle to a chord shared by the callbacks of all its members.
#[derive(Clone)]
pub struct Combination {
    state: Arc<Mutex<CombinationState>>,
}

impl Combination {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(CombinationState {
                count: 0,
                counter: 0,
                press: None,
                release: None,
            })),
        }
    }

    fn lock(state: &Mutex<CombinationState>) -> MutexGuard<'_, CombinationState> {
        state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a member and returns the press/release pair to bind to it.
    pub fn register_member(&self) -> (Callback, Callback) {
        Self::lock(&self.state).count += 1;

        let press_state = Arc::clone(&self.state);
        let release_state = Arc::clone(&self.state);
        (
            callback(move |ctx| {
                let mut guard = Self::lock(&press_state);
                let state = &mut *guard;
                state.counter += 1;
                if state.counter == state.count
                    && let Some(press) = state.press.as_mut()
                {
                    press(ctx);
                }
            }),
            callback(move |ctx| {
                let mut guard = Self::lock(&release_state);
                let state = &mut *guard;
                if state.counter == state.count
                    && let Some(release) = state.release.as_mut()
                {
                    release(ctx);
                }
                state.counter = state.counter.saturating_sub(1);
            }),
        )
    }

    pub fn set_action(&self, press: Callback, release: Callback) {
        let mut state = Self::lock(&self.state);
        state.press = Some(press);
        state.release = Some(release);
    }

    pub fn member_count(&self) -> usize {
        Self::lock(&self.state).count
    }

    pub fn pressed_count(&self) -> usize {
        Self::lock(&self.state).counter
    }

    /// Whether every member is currently held.
    pub fn is_active(&self) -> bool {
        let state = Self::lock(&self.state);
        state.count > 0 && state.counter == state.count
    }
}

impl Default for Combination {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a combination out of buttons and axis-buttons of one device layer.
pub struct CombinationBuilder<'a> {
    gamepad: &'a mut Gamepad,
    layer: Layer,
    combination: Combination,
}

impl<'a> CombinationBuilder<'a> {
    pub(super) fn new(gamepad: &'a mut Gamepad, layer: Layer) -> Self {
        Self {
            gamepad,
            layer,
            combination: Combination::new(),
        }
    }

    pub fn button(self, id: ButtonId) -> Self {
        let (press, release) = self.combination.register_member();
        self.gamepad
            .bind_button_with(self.layer, id, Some(press), Some(release));
        self
    }

    /// Adds an axis that counts as held past `press_threshold`.
    pub fn axis_button(self, id: AxisId, press_threshold: f64, release_threshold: f64) -> Self {
        let (press, release) = self.combination.register_member();
        self.gamepad.bind_axis_button_with(
            self.layer,
            id,
            press_threshold,
            release_threshold,
            Some(press),
            Some(release),
        );
        self
    }

    pub fn build(self, action: Action) -> Combination {
        let (press, release) = action.into_handlers();
        self.build_with(press, release)
    }

    pub fn build_with(self, press: Callback, release: Callback) -> Combination {
        self.combination.set_action(press, release);
        self.combination
    }
}
