//! Host timing primitives.
//!
//! Scheduled work is modeled as messages: the scheduler hands a [`Wakeup`]
//! back to its owner, which routes it to the controller by explicit method
//! call. No closures over overlay state are ever stored.

use std::time::Duration;

use crate::id::OverlayId;

/// Opaque handle to a scheduled frame or timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Message delivered when scheduled work comes due.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Wakeup {
    /// A layout pass completed; measure and place the overlay.
    Frame { overlay: OverlayId, generation: u64 },
    /// A deferred hide's grace period elapsed.
    HideTimer { overlay: OverlayId, token: u64 },
}

impl Wakeup {
    /// The overlay this wakeup belongs to.
    pub fn overlay(&self) -> &OverlayId {
        match self {
            Wakeup::Frame { overlay, .. } | Wakeup::HideTimer { overlay, .. } => overlay,
        }
    }
}

/// Next-frame and fixed-delay timer scheduling.
///
/// Cancelling a handle that is unknown, already fired or already cancelled
/// must be a silent no-op.
pub trait Scheduler {
    /// Deliver `wakeup` after the next layout pass.
    fn request_frame(&mut self, wakeup: Wakeup) -> TaskHandle;

    /// Deliver `wakeup` once `delay` has elapsed.
    fn start_timer(&mut self, delay: Duration, wakeup: Wakeup) -> TaskHandle;

    /// Cancel a pending frame or timer.
    fn cancel(&mut self, handle: TaskHandle);

    /// Drain frame wakeups queued since the last layout pass.
    fn take_frames(&mut self) -> Vec<Wakeup>;
}
