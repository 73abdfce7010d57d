//! Trait abstractions over the host platform.
//!
//! The overlay engine never talks to a terminal, window or clock directly.
//! Hosts provide these traits, and tests substitute deterministic fakes.
//!
//! # Traits
//!
//! - [`Scheduler`] - next-frame callbacks and fixed-delay timers
//! - [`LayoutHost`] - trigger rects, overlay sizes and viewport size on demand

pub mod layout;
pub mod scheduler;

pub use layout::LayoutHost;
pub use scheduler::{Scheduler, TaskHandle, Wakeup};
