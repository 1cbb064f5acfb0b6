use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

use crate::error::{EngineError, Result};

/// Largest accepted dead zone. A dead zone of 1 would divide by zero.
pub const MAX_DEADZONE: f64 = 0.95;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
    #[serde(default = "default_reconnect_interval")]
    pub reconnect_interval: u64,
    #[serde(default)]
    pub start_enabled: bool,
    #[serde(default = "default_true")]
    pub vibration_feedback: bool,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default = "default_on_screen_keyboard")]
    pub on_screen_keyboard: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub profile: ProfileConfig,
}

/// Speeds and dead zones of the default binding profile.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProfileConfig {
    #[serde(default = "default_speed")]
    pub cursor_speed: f64,
    #[serde(default = "default_deadzone")]
    pub cursor_deadzone: f64,
    #[serde(default = "default_speed")]
    pub scroll_speed: f64,
    #[serde(default = "default_deadzone")]
    pub scroll_deadzone: f64,
    #[serde(default = "default_speed")]
    pub trigger_scroll_speed: f64,
    #[serde(default = "default_deadzone")]
    pub trigger_deadzone: f64,
}

fn default_poll_interval() -> u64 {
    10
}
fn default_reconnect_interval() -> u64 {
    250
}
fn default_true() -> bool {
    true
}
fn default_on_screen_keyboard() -> String {
    "osk.exe".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_speed() -> f64 {
    10.0
}
fn default_deadzone() -> f64 {
    0.25
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            poll_interval: default_poll_interval(),
            reconnect_interval: default_reconnect_interval(),
            start_enabled: false,
            vibration_feedback: true,
            dry_run: false,
            on_screen_keyboard: default_on_screen_keyboard(),
            log_level: default_log_level(),
            profile: ProfileConfig::default(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            cursor_speed: default_speed(),
            cursor_deadzone: default_deadzone(),
            scroll_speed: default_speed(),
            scroll_deadzone: default_deadzone(),
            trigger_scroll_speed: default_speed(),
            trigger_deadzone: default_deadzone(),
        }
    }
}

impl AppConfig {
    /// Load config from file, or fall back to defaults if it does not exist.
    ///
    /// The file is never created or written.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Clamps out-of-range values and rejects unusable ones.
    pub fn validate(&mut self) -> Result<()> {
        if self.poll_interval < 1 {
            self.poll_interval = 1;
        }
        if self.reconnect_interval < 1 {
            self.reconnect_interval = 1;
        }
        if self.on_screen_keyboard.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "on_screen_keyboard must name a program".to_string(),
            ));
        }
        self.profile.validate()
    }

    pub fn poll_interval_duration(&self) -> Duration {
        Duration::from_millis(self.poll_interval)
    }

    pub fn reconnect_interval_duration(&self) -> Duration {
        Duration::from_millis(self.reconnect_interval)
    }
}

impl ProfileConfig {
    fn validate(&mut self) -> Result<()> {
        let speeds = [
            ("cursor_speed", self.cursor_speed),
            ("scroll_speed", self.scroll_speed),
            ("trigger_scroll_speed", self.trigger_scroll_speed),
        ];
        for (name, value) in speeds {
            if !value.is_finite() {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must be a finite number",
                    name
                )));
            }
        }

        for (name, deadzone) in [
            ("cursor_deadzone", &mut self.cursor_deadzone),
            ("scroll_deadzone", &mut self.scroll_deadzone),
            ("trigger_deadzone", &mut self.trigger_deadzone),
        ] {
            if deadzone.is_nan() {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must be a number",
                    name
                )));
            }
            *deadzone = deadzone.clamp(0.0, MAX_DEADZONE);
        }
        Ok(())
    }
}
