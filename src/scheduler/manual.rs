//! Deterministic scheduler driven by a virtual clock.

use std::time::Duration;

use super::FrameQueue;
use crate::traits::{Scheduler, TaskHandle, Wakeup};

#[derive(Debug)]
struct PendingTimer {
    handle: TaskHandle,
    deadline: Duration,
    wakeup: Wakeup,
}

/// Scheduler whose clock only moves when [`advance`](ManualScheduler::advance) is called.
///
/// Timers fire once the virtual clock reaches their deadline exactly, so a
/// 100 ms timer started at t=0 is still pending at t=99 ms and fires at t=100 ms.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_handle: u64,
    frames: FrameQueue,
    timers: Vec<PendingTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward and return the timers that came due, in deadline order.
    pub fn advance(&mut self, by: Duration) -> Vec<Wakeup> {
        self.now += by;
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.timers).into_iter().partition(|t| t.deadline <= now);
        self.timers = pending;

        due.sort_by_key(|t| (t.deadline, t.handle));
        due.into_iter().map(|t| t.wakeup).collect()
    }

    /// Number of armed timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of queued frame wakeups.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    fn mint(&mut self) -> TaskHandle {
        self.next_handle += 1;
        TaskHandle::new(self.next_handle)
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self, wakeup: Wakeup) -> TaskHandle {
        let handle = self.mint();
        self.frames.push(handle, wakeup);
        handle
    }

    fn start_timer(&mut self, delay: Duration, wakeup: Wakeup) -> TaskHandle {
        let handle = self.mint();
        self.timers.push(PendingTimer {
            handle,
            deadline: self.now + delay,
            wakeup,
        });
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        if self.frames.cancel(handle) {
            return;
        }
        self.timers.retain(|t| t.handle != handle);
    }

    fn take_frames(&mut self) -> Vec<Wakeup> {
        self.frames.take()
    }
}
