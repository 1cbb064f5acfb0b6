//! On-screen keyboard toggling.
//!
//! The keyboard is an external helper program. We keep at most one process
//! handle and decide what a toggle means from whether that process is still
//! alive.

use std::io;

use tracing::{debug, info, warn};

/// A launched helper process.
pub trait HelperProcess: Send {
    /// Whether the process has not exited yet.
    fn is_running(&mut self) -> bool;

    /// Kills the process and releases its handle.
    fn terminate(&mut self);
}

/// Starts the helper program.
pub trait HelperLauncher: Send {
    fn launch(&mut self) -> io::Result<Box<dyn HelperProcess>>;
}

/// Launcher for hosts without an on-screen keyboard.
#[derive(Debug, Default)]
pub struct UnavailableLauncher;

impl HelperLauncher for UnavailableLauncher {
    fn launch(&mut self) -> io::Result<Box<dyn HelperProcess>> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "no on-screen keyboard on this platform",
        ))
    }
}

pub struct OnScreenKeyboard {
    launcher: Box<dyn HelperLauncher>,
    process: Option<Box<dyn HelperProcess>>,
}

impl OnScreenKeyboard {
    pub fn new(launcher: Box<dyn HelperLauncher>) -> Self {
        Self {
            launcher,
            process: None,
        }
    }

    /// Opens the keyboard if closed, closes it if open, restarts it if the
    /// tracked process has exited on its own.
    pub fn toggle(&mut self) {
        let running = self.process.as_mut().map(|process| process.is_running());
        match running {
            Some(true) => self.close(),
            Some(false) => {
                debug!("On-screen keyboard exited, restarting");
                self.process = None;
                self.open();
            }
            None => self.open(),
        }
    }

    /// Launches the helper. A failure leaves nothing tracked so the next
    /// toggle retries.
    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        match self.launcher.launch() {
            Ok(process) => {
                info!("On-screen keyboard opened");
                self.process = Some(process);
            }
            Err(e) => {
                warn!("Failed to launch on-screen keyboard: {}", e);
                self.process = None;
            }
        }
    }

    pub fn close(&mut self) {
        if let Some(mut process) = self.process.take() {
            process.terminate();
            info!("On-screen keyboard closed");
        }
    }

    pub fn is_open(&mut self) -> bool {
        self.process
            .as_mut()
            .is_some_and(|process| process.is_running())
    }
}

impl Default for OnScreenKeyboard {
    fn default() -> Self {
        Self::new(Box::new(UnavailableLauncher))
    }
}

#[cfg(windows)]
pub use shell::{ShellLauncher, ShellProcess};

#[cfg(windows)]
mod shell {
    use std::io;

    use windows::Win32::Foundation::{CloseHandle, HANDLE, STILL_ACTIVE};
    use windows::Win32::System::Threading::{GetExitCodeProcess, TerminateProcess};
    use windows::Win32::UI::Shell::{SEE_MASK_NOCLOSEPROCESS, SHELLEXECUTEINFOW, ShellExecuteExW};
    use windows::Win32::UI::WindowsAndMessaging::SW_SHOWDEFAULT;
    use windows::core::{HSTRING, PCWSTR, w};

    use super::{HelperLauncher, HelperProcess};

    /// Starts the helper through the shell.
    ///
    /// `osk.exe` is marked uiAccess, so `CreateProcess` refuses to start it
    /// from a normal-integrity process.
    pub struct ShellLauncher {
        program: HSTRING,
    }

    impl ShellLauncher {
        pub fn new(program: &str) -> Self {
            Self {
                program: HSTRING::from(program),
            }
        }
    }

    impl HelperLauncher for ShellLauncher {
        fn launch(&mut self) -> io::Result<Box<dyn HelperProcess>> {
            let mut info = SHELLEXECUTEINFOW {
                cbSize: std::mem::size_of::<SHELLEXECUTEINFOW>() as u32,
                fMask: SEE_MASK_NOCLOSEPROCESS,
                lpVerb: w!("open"),
                lpFile: PCWSTR(self.program.as_ptr()),
                nShow: SW_SHOWDEFAULT.0,
                ..Default::default()
            };

            unsafe { ShellExecuteExW(&mut info) }.map_err(io::Error::other)?;

            if info.hProcess.is_invalid() {
                return Err(io::Error::other("shell returned no process handle"));
            }
            Ok(Box::new(ShellProcess {
                handle: info.hProcess,
            }))
        }
    }

    pub struct ShellProcess {
        handle: HANDLE,
    }

    // The handle is only used from the thread that currently owns the keyboard.
    unsafe impl Send for ShellProcess {}

    impl HelperProcess for ShellProcess {
        fn is_running(&mut self) -> bool {
            let mut code = 0u32;
            unsafe { GetExitCodeProcess(self.handle, &mut code) }.is_ok()
                && code == STILL_ACTIVE.0 as u32
        }

        fn terminate(&mut self) {
            unsafe {
                let _ = TerminateProcess(self.handle, 0);
            }
        }
    }

    impl Drop for ShellProcess {
        fn drop(&mut self) {
            unsafe {
                let _ = CloseHandle(self.handle);
            }
        }
    }
}
