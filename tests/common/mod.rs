//! Common test utilities for integration tests.
//!
//! Provides a fake layout host and a [`Harness`] that drives an
//! [`OverlayRegistry`] on a virtual clock the way a render loop would:
//! dispatch an event, then run a layout pass.
//!
//! # Example
//!
//! ```ignore
//! let mut h = Harness::new();
//! h.mount_hover("tip");
//! h.send(InputEvent::PointerEnter(trigger("tip")));
//! assert!(h.registry.is_shown("tip"));
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::time::Duration;

use tether::binder::{InputEvent, Target};
use tether::config::{EngineConfig, OverlayOptions};
use tether::id::OverlayId;
use tether::registry::OverlayRegistry;
use tether::scheduler::ManualScheduler;

/// Registry on a virtual clock plus the layout it is measured against.
pub struct Harness {
    pub registry: OverlayRegistry<ManualScheduler>,
    pub layout: FakeLayout,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            registry: OverlayRegistry::new(ManualScheduler::new(), config),
            layout: FakeLayout::standard(),
        }
    }

    /// Register a trigger and mount a hover overlay on it.
    pub fn mount_hover(&mut self, id: &str) {
        self.registry.register_trigger(id);
        assert!(self.registry.mount(id, OverlayOptions::hover()));
    }

    /// Register a trigger and mount a persisted overlay on it.
    pub fn mount_persisted(&mut self, id: &str) {
        self.registry.register_trigger(id);
        assert!(self.registry.mount(id, OverlayOptions::persisted()));
    }

    /// Dispatch an event, then run a layout pass.
    pub fn send(&mut self, event: InputEvent) {
        self.registry.dispatch(&event);
        self.frame();
    }

    /// Run a layout pass, applying pending show frames.
    pub fn frame(&mut self) -> usize {
        self.registry.flush_frames(&self.layout)
    }

    /// Advance the virtual clock by `ms` milliseconds, delivering due timers.
    pub fn wait(&mut self, ms: u64) -> usize {
        self.registry.advance(Duration::from_millis(ms), &self.layout)
    }

    pub fn now_ms(&self) -> u128 {
        self.registry.scheduler().now().as_millis()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

pub fn trigger(id: &str) -> Target {
    Target::Trigger(OverlayId::from(id))
}

pub fn overlay(id: &str) -> Target {
    Target::Overlay(OverlayId::from(id))
}
