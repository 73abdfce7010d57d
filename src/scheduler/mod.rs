//! Scheduler implementations.
//!
//! - [`ManualScheduler`] - virtual clock advanced explicitly (tests, replays)
//! - [`TokioScheduler`] - real timers on the tokio runtime, delivered over a channel
//!
//! Both queue frame wakeups in a [`FrameQueue`] that the host drains after
//! each layout pass.

mod async_timer;
mod manual;

pub use async_timer::{TokioScheduler, WakeupReceiver};
pub use manual::ManualScheduler;

use crate::traits::{TaskHandle, Wakeup};

/// Pending next-frame wakeups, in request order.
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: Vec<(TaskHandle, Wakeup)>,
}

impl FrameQueue {
    pub fn push(&mut self, handle: TaskHandle, wakeup: Wakeup) {
        self.pending.push((handle, wakeup));
    }

    /// Remove a queued frame. Returns whether it was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(h, _)| *h != handle);
        self.pending.len() != before
    }

    pub fn take(&mut self) -> Vec<Wakeup> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(_, wakeup)| wakeup)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
