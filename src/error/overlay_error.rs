//! Unified error type for the overlay engine.

use std::path::PathBuf;

use thiserror::Error;

use super::category::ErrorCategory;

/// Errors raised outside the interaction paths.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// Configuration JSON could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("failed to read config file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is out of range.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// Terminal or filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A global tracing subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    /// The receiving side of the wakeup channel was dropped.
    #[error("scheduler channel closed")]
    ChannelClosed,
}

impl OverlayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OverlayError::InvalidConfig(_)
            | OverlayError::ConfigRead { .. }
            | OverlayError::InvalidValue { .. } => ErrorCategory::Configuration,
            OverlayError::Io(_) | OverlayError::Logging(_) => ErrorCategory::System,
            OverlayError::ChannelClosed => ErrorCategory::Client,
        }
    }

    /// Whether the engine can keep running (falling back to defaults).
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, OverlayError::ChannelClosed)
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            OverlayError::InvalidConfig(_) => "E_CFG_PARSE",
            OverlayError::ConfigRead { .. } => "E_CFG_READ",
            OverlayError::InvalidValue { .. } => "E_CFG_VALUE",
            OverlayError::Io(_) => "E_SYS_IO",
            OverlayError::Logging(_) => "E_SYS_LOG",
            OverlayError::ChannelClosed => "E_SCHED_CHANNEL",
        }
    }
}
