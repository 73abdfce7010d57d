//! Scheduler backed by the tokio runtime.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::FrameQueue;
use crate::error::{OverlayError, OverlayResult};
use crate::traits::{Scheduler, TaskHandle, Wakeup};

/// Scheduler that arms real timers as tokio tasks.
///
/// Each timer is a spawned `sleep` that posts its [`Wakeup`] on an unbounded
/// channel; cancelling aborts the task. Frames are queued and drained by the
/// host after each draw. `start_timer` must be called from within a tokio
/// runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<Wakeup>,
    next_handle: u64,
    frames: FrameQueue,
    timers: HashMap<TaskHandle, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver on which its timers are delivered.
    pub fn new() -> (Self, WakeupReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            next_handle: 0,
            frames: FrameQueue::default(),
            timers: HashMap::new(),
        };
        (scheduler, WakeupReceiver { rx })
    }

    /// Number of timers that have neither fired nor been cancelled.
    pub fn pending_timers(&self) -> usize {
        self.timers.values().filter(|task| !task.is_finished()).count()
    }

    fn mint(&mut self) -> TaskHandle {
        self.next_handle += 1;
        TaskHandle::new(self.next_handle)
    }

    fn reap_finished(&mut self) {
        self.timers.retain(|_, task| !task.is_finished());
    }
}

impl Scheduler for TokioScheduler {
    fn request_frame(&mut self, wakeup: Wakeup) -> TaskHandle {
        let handle = self.mint();
        self.frames.push(handle, wakeup);
        handle
    }

    fn start_timer(&mut self, delay: Duration, wakeup: Wakeup) -> TaskHandle {
        self.reap_finished();
        let handle = self.mint();
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(wakeup).is_err() {
                tracing::trace!("Wakeup receiver dropped; discarding timer");
            }
        });
        self.timers.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        if self.frames.cancel(handle) {
            return;
        }
        if let Some(task) = self.timers.remove(&handle) {
            task.abort();
        }
    }

    fn take_frames(&mut self) -> Vec<Wakeup> {
        self.frames.take()
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.timers.drain() {
            task.abort();
        }
    }
}

/// Receiving end of a [`TokioScheduler`].
#[derive(Debug)]
pub struct WakeupReceiver {
    rx: mpsc::UnboundedReceiver<Wakeup>,
}

impl WakeupReceiver {
    /// Wait for the next timer wakeup.
    ///
    /// Fails with [`OverlayError::ChannelClosed`] once the scheduler is gone.
    pub async fn recv(&mut self) -> OverlayResult<Wakeup> {
        self.rx.recv().await.ok_or(OverlayError::ChannelClosed)
    }

    /// Take a wakeup if one is already waiting.
    pub fn try_recv(&mut self) -> Option<Wakeup> {
        self.rx.try_recv().ok()
    }
}
