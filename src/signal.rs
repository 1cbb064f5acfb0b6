use std::sync::OnceLock;

use crossbeam_channel::Sender;
use windows::Win32::System::Console::*;
use windows::core::*;

static SHUTDOWN: OnceLock<Sender<()>> = OnceLock::new();

/// Routes Ctrl+C, Ctrl+Break and console close to `shutdown`.
pub fn set_control_ctrl_handler(shutdown: Sender<()>) -> Result<()> {
    let _ = SHUTDOWN.set(shutdown);
    unsafe { SetConsoleCtrlHandler(Some(console_handler), true) }
}

#[allow(non_snake_case)]
unsafe extern "system" fn console_handler(ctrl_type: u32) -> BOOL {
    match ctrl_type {
        CTRL_C_EVENT | CTRL_BREAK_EVENT | CTRL_CLOSE_EVENT => {
            // No receiver installed yet means nothing needs releasing.
            match SHUTDOWN.get() {
                Some(sender) => {
                    let _ = sender.try_send(());
                }
                None => std::process::exit(0),
            }
            BOOL(1)
        }
        _ => BOOL(0),
    }
}
