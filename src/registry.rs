//! The fixed set of controller slots.

use std::time::Instant;

use tracing::debug;

use crate::config::AppConfig;
use crate::gamepad::{DeviceStatus, Gamepad, profile};
use crate::keyboard::OnScreenKeyboard;
use crate::output::OutputSink;
use crate::source::ControllerSource;

/// Number of controller slots the platform exposes.
pub const MAX_DEVICES: usize = 4;

/// Output shared by every device.
pub struct Outputs {
    pub sink: OutputSink,
    pub keyboard: OnScreenKeyboard,
}

impl Outputs {
    pub fn new(sink: OutputSink, keyboard: OnScreenKeyboard) -> Self {
        Self { sink, keyboard }
    }
}

pub struct Registry {
    devices: [Gamepad; MAX_DEVICES],
    source: Box<dyn ControllerSource>,
    outputs: Outputs,
    terminated: bool,
}

impl Registry {
    /// Creates all slots with the default profile.
    pub fn initialize(
        source: Box<dyn ControllerSource>,
        outputs: Outputs,
        config: &AppConfig,
    ) -> Self {
        let devices = std::array::from_fn(|index| {
            let mut gamepad = Gamepad::new(index, config.start_enabled)
                .with_reconnect_interval(config.reconnect_interval_duration());
            profile::install_default(&mut gamepad, config);
            gamepad
        });
        Self::with_devices(source, outputs, devices)
    }

    /// Uses caller-built devices; slot `i` should hold a device with index `i`.
    pub fn with_devices(
        source: Box<dyn ControllerSource>,
        outputs: Outputs,
        devices: [Gamepad; MAX_DEVICES],
    ) -> Self {
        Self {
            devices,
            source,
            outputs,
            terminated: false,
        }
    }

    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    pub fn update_at(&mut self, now: Instant) {
        for device in self.devices.iter_mut() {
            device.update_at(now, self.source.as_mut(), &mut self.outputs);
        }
    }

    pub fn device(&self, index: usize) -> Option<&Gamepad> {
        self.devices.get(index)
    }

    pub fn device_mut(&mut self, index: usize) -> Option<&mut Gamepad> {
        self.devices.get_mut(index)
    }

    pub fn devices(&self) -> &[Gamepad] {
        &self.devices
    }

    pub fn outputs_mut(&mut self) -> &mut Outputs {
        &mut self.outputs
    }

    pub fn is_connected(&self, index: usize) -> bool {
        self.device(index).is_some_and(Gamepad::is_connected)
    }

    pub fn is_enabled(&self, index: usize) -> bool {
        self.device(index).is_some_and(Gamepad::is_enabled)
    }

    /// Flips enablement of one slot. Returns false for an unknown slot.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.device_mut(index) {
            Some(device) => {
                device.toggle();
                true
            }
            None => {
                debug!("Ignoring toggle of unknown controller {}", index);
                false
            }
        }
    }

    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> bool {
        match self.device_mut(index) {
            Some(device) => {
                device.set_enabled(enabled);
                true
            }
            None => {
                debug!("Ignoring enable of unknown controller {}", index);
                false
            }
        }
    }

    pub fn statuses(&self) -> [DeviceStatus; MAX_DEVICES] {
        std::array::from_fn(|index| self.devices[index].status())
    }

    /// Releases held output on every device, disables them and closes the
    /// on-screen keyboard. Later calls do nothing.
    pub fn terminate(&mut self) {
        if self.terminated {
            return;
        }
        self.terminated = true;

        for device in self.devices.iter_mut() {
            device.release_all(self.source.as_mut(), &mut self.outputs);
        }
        self.outputs.keyboard.close();
        debug!("Controller registry terminated");
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        self.terminate();
    }
}
