//! Error category classification.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Invalid or unreadable configuration.
    /// Not retryable until the configuration is corrected.
    Configuration,

    /// OS-level errors (filesystem, terminal).
    System,

    /// Programming errors (a torn-down channel, invalid wiring).
    Client,
}

impl ErrorCategory {
    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::System => "system",
            ErrorCategory::Client => "client",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
