//! Error types for the input-mapping engine.

use thiserror::Error;

/// Errors raised while setting up or running the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Reading the configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`AppConfig`](crate::config::AppConfig).
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// A configuration value is out of its accepted range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The polling thread could not be started.
    #[error("Failed to spawn polling thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Outcome of a failed controller poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PollError {
    /// Nothing is plugged into the requested slot.
    #[error("controller not connected")]
    NotConnected,

    /// The platform reported some other error code.
    #[error("controller poll failed with code {0}")]
    Failed(u32),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
