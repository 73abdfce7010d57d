//! Derived controller state.

use std::fmt;

/// Conceptual state of an overlay, derived from its visibility flag, its
/// in-flight frame request and its hide timer. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerState {
    /// Hidden, nothing pending.
    Closed,
    /// Show requested; waiting for a layout pass to measure and place.
    Opening,
    /// Shown.
    Open,
    /// Shown with an armed hide timer.
    OpenPendingClose,
}

impl ControllerState {
    /// Whether the overlay is currently visible.
    pub fn is_visible(&self) -> bool {
        matches!(self, ControllerState::Open | ControllerState::OpenPendingClose)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerState::Closed => "closed",
            ControllerState::Opening => "opening",
            ControllerState::Open => "open",
            ControllerState::OpenPendingClose => "open-pending-close",
        }
    }
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
