//! Result type alias for overlay engine operations.

use super::overlay_error::OverlayError;

/// Type alias for Results using OverlayError.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Extension trait for logging and discarding recoverable errors.
pub trait ResultExt<T> {
    /// Log the error at `warn` level and fall back to `default`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use tether::error::ResultExt;
    ///
    /// let config = EngineConfig::load(path).or_warn("load_config", EngineConfig::default());
    /// ```
    fn or_warn(self, operation: &str, default: T) -> T;
}

impl<T> ResultExt<T> for OverlayResult<T> {
    fn or_warn(self, operation: &str, default: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(
                    operation,
                    code = err.error_code(),
                    "{}; falling back to default",
                    err
                );
                default
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_warn_returns_value_on_ok() {
        let result: OverlayResult<u32> = Ok(7);
        assert_eq!(result.or_warn("test", 0), 7);
    }

    #[test]
    fn test_or_warn_returns_default_on_err() {
        let result: OverlayResult<u32> = Err(OverlayError::ChannelClosed);
        assert_eq!(result.or_warn("test", 3), 3);
    }
}
