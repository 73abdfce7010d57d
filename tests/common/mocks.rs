//! Fake host implementations.

use std::collections::HashMap;
use std::time::Duration;

use tether::geometry::{OverlaySize, Rect, ViewportSize};
use tether::id::OverlayId;
use tether::scheduler::ManualScheduler;
use tether::traits::{LayoutHost, Scheduler, TaskHandle, Wakeup};

/// Layout host backed by plain maps.
///
/// Triggers default to a small rect near the top-left of a 1024x768
/// viewport; overlays default to unmeasured.
#[derive(Debug, Clone)]
pub struct FakeLayout {
    pub viewport: ViewportSize,
    pub default_trigger: Option<Rect>,
    pub triggers: HashMap<OverlayId, Rect>,
    pub sizes: HashMap<OverlayId, OverlaySize>,
}

impl FakeLayout {
    pub fn standard() -> Self {
        Self {
            viewport: ViewportSize::new(1024.0, 768.0),
            default_trigger: Some(Rect::from_edges(40.0, 60.0, 100.0, 200.0)),
            triggers: HashMap::new(),
            sizes: HashMap::new(),
        }
    }

    pub fn with_trigger(mut self, id: &str, rect: Rect) -> Self {
        self.triggers.insert(OverlayId::from(id), rect);
        self
    }

    pub fn with_size(mut self, id: &str, size: OverlaySize) -> Self {
        self.sizes.insert(OverlayId::from(id), size);
        self
    }

    /// Simulate a trigger with no layout (detached or not yet drawn).
    pub fn without_default_trigger(mut self) -> Self {
        self.default_trigger = None;
        self
    }
}

impl LayoutHost for FakeLayout {
    fn trigger_rect(&self, id: &OverlayId) -> Option<Rect> {
        self.triggers.get(id).copied().or(self.default_trigger)
    }

    fn overlay_size(&self, id: &OverlayId) -> Option<OverlaySize> {
        self.sizes.get(id).copied()
    }

    fn viewport(&self) -> ViewportSize {
        self.viewport
    }
}

/// One scheduler call, as recorded by [`RecordingScheduler`].
#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerCall {
    RequestFrame(Wakeup),
    StartTimer(Duration, Wakeup),
    Cancel(TaskHandle),
}

/// Manual scheduler that records every call made to it.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    pub inner: ManualScheduler,
    calls: Vec<SchedulerCall>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[SchedulerCall] {
        &self.calls
    }

    pub fn cancel_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SchedulerCall::Cancel(_)))
            .count()
    }
}

impl Scheduler for RecordingScheduler {
    fn request_frame(&mut self, wakeup: Wakeup) -> TaskHandle {
        self.calls.push(SchedulerCall::RequestFrame(wakeup.clone()));
        self.inner.request_frame(wakeup)
    }

    fn start_timer(&mut self, delay: Duration, wakeup: Wakeup) -> TaskHandle {
        self.calls.push(SchedulerCall::StartTimer(delay, wakeup.clone()));
        self.inner.start_timer(delay, wakeup)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.calls.push(SchedulerCall::Cancel(handle));
        self.inner.cancel(handle);
    }

    fn take_frames(&mut self) -> Vec<Wakeup> {
        self.inner.take_frames()
    }
}
