use anyhow::Result;
use gamepad_mouse::AppConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "Config.toml";

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = AppConfig::load_or_default(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load configuration from {}: {}", path, e))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if std::path::Path::new(&path).exists() {
        info!("Loaded configuration from {}", path);
    } else {
        info!("No configuration at {}, using defaults", path);
    }

    run(config)
}

#[cfg(windows)]
fn run(config: AppConfig) -> Result<()> {
    use gamepad_mouse::keyboard::ShellLauncher;
    use gamepad_mouse::output::LoggingInjector;
    use gamepad_mouse::output::sendinput::SendInputInjector;
    use gamepad_mouse::xinput::XInputSource;
    use gamepad_mouse::{
        Driver, InputInjector, OnScreenKeyboard, OutputSink, Outputs, Registry, signal,
    };
    use windows::Win32::Media::{timeBeginPeriod, timeEndPeriod};

    // Request 1ms timer resolution so the tick sleep is accurate
    unsafe { timeBeginPeriod(1) };

    let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded(1);
    signal::set_control_ctrl_handler(shutdown_tx)?;

    let injector: Box<dyn InputInjector> = if config.dry_run {
        info!("Dry run: synthetic input is logged, not injected");
        Box::new(LoggingInjector)
    } else {
        Box::new(SendInputInjector::new())
    };
    let outputs = Outputs::new(
        OutputSink::new(injector),
        OnScreenKeyboard::new(Box::new(ShellLauncher::new(&config.on_screen_keyboard))),
    );
    let registry = Registry::initialize(Box::new(XInputSource::new()), outputs, &config);
    let driver = Driver::start(registry, config.poll_interval_duration())?;

    info!("Press Back+Start on a controller to toggle it, Ctrl+C to quit");
    let _ = shutdown_rx.recv();

    driver.shutdown();
    unsafe { timeEndPeriod(1) };
    Ok(())
}

#[cfg(not(windows))]
fn run(_config: AppConfig) -> Result<()> {
    anyhow::bail!("gamepad-mouse needs XInput and SendInput, which are only available on Windows")
}
