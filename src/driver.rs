//! Background polling thread.
//!
//! One mutex guards the registry together with the run flag. The polling
//! thread holds it for exactly one tick, so control calls from other threads
//! wait at most one tick.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{info, warn};

use crate::error::{EngineError, Result};
use crate::gamepad::DeviceStatus;
use crate::registry::{MAX_DEVICES, Registry};

/// Default time between ticks.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

struct Shared {
    registry: Registry,
    running: bool,
}

pub struct Driver {
    shared: Arc<Mutex<Shared>>,
    thread: Option<JoinHandle<()>>,
}

impl Driver {
    /// Moves `registry` onto a new polling thread ticking every `interval`.
    pub fn start(registry: Registry, interval: Duration) -> Result<Self> {
        let shared = Arc::new(Mutex::new(Shared {
            registry,
            running: true,
        }));

        let worker = Arc::clone(&shared);
        let thread = thread::Builder::new()
            .name("gamepad_poll".to_string())
            .spawn(move || Self::run(&worker, interval))
            .map_err(EngineError::Spawn)?;

        info!("Polling driver started ({} ms interval)", interval.as_millis());
        Ok(Self {
            shared,
            thread: Some(thread),
        })
    }

    fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
        shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn run(shared: &Mutex<Shared>, interval: Duration) {
        loop {
            {
                let mut shared = Self::lock(shared);
                if !shared.running {
                    break;
                }
                shared.registry.update();
            }
            thread::sleep(interval);
        }
    }

    /// Runs `f` with the registry while holding the tick lock.
    pub fn with_registry<R>(&self, f: impl FnOnce(&mut Registry) -> R) -> R {
        f(&mut Self::lock(&self.shared).registry)
    }

    pub fn toggle(&self, index: usize) -> bool {
        self.with_registry(|registry| registry.toggle(index))
    }

    pub fn set_enabled(&self, index: usize, enabled: bool) -> bool {
        self.with_registry(|registry| registry.set_enabled(index, enabled))
    }

    pub fn statuses(&self) -> [DeviceStatus; MAX_DEVICES] {
        self.with_registry(|registry| registry.statuses())
    }

    pub fn is_running(&self) -> bool {
        Self::lock(&self.shared).running
            && self
                .thread
                .as_ref()
                .is_some_and(|thread| !thread.is_finished())
    }

    /// Clears the run flag and joins the polling thread. The tick in
    /// progress, if any, completes first.
    pub fn stop(&mut self) {
        Self::lock(&self.shared).running = false;

        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Polling thread panicked");
            }
            info!("Polling driver stopped");
        }
    }

    /// Stops polling and releases everything the devices still hold.
    pub fn shutdown(mut self) {
        self.stop();
        self.with_registry(Registry::terminate);
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.stop();
    }
}
