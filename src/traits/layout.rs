//! Host layout queries.

use crate::geometry::{OverlaySize, Rect, ViewportSize};
use crate::id::OverlayId;

/// Read-only view of the host's current layout.
///
/// Every query reflects the layout at the moment of the call; implementations
/// must not cache the viewport between calls.
pub trait LayoutHost {
    /// Current bounding rect of the trigger driving `overlay`, if it is laid out.
    fn trigger_rect(&self, overlay: &OverlayId) -> Option<Rect>;

    /// Rendered size of `overlay`, `None` until it has had a layout pass.
    fn overlay_size(&self, overlay: &OverlayId) -> Option<OverlaySize>;

    /// Current viewport size.
    fn viewport(&self) -> ViewportSize;
}
