//! Prelude module for convenient imports.
//!
//! ```ignore
//! use tether::prelude::*;
//! ```

// Engine
pub use crate::config::{EngineConfig, OverlayOptions};
pub use crate::controller::{ControllerState, InteractionController};
pub use crate::registry::OverlayRegistry;

// Input
pub use crate::binder::{
    EventBinder, HitRegions, InputEvent, InteractionMode, Key, PointerTracker, Propagation, Target,
};

// Geometry and placement
pub use crate::geometry::{OverlaySize, Rect, ViewportSize};
pub use crate::id::OverlayId;
pub use crate::placement::{Placement, PlacementSet};

// Host traits and schedulers
pub use crate::scheduler::{ManualScheduler, TokioScheduler, WakeupReceiver};
pub use crate::traits::{LayoutHost, Scheduler, TaskHandle, Wakeup};

// Errors
pub use crate::error::{OverlayError, OverlayResult};
