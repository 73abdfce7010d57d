//! Overlay origin calculation for a committed placement.

use super::Placement;
use crate::geometry::{OverlaySize, Rect, ViewportSize};

/// Default clearance kept between a positioned overlay and the viewport edges,
/// in terminal cells.
pub const EDGE_PADDING: f32 = 1.0;

/// Compute the overlay's rect for `placement`.
///
/// The overlay sits `gap` away from the trigger on the primary axis and is
/// centered on the cross axis. Only the cross axis is clamped to stay at least
/// `padding` away from the viewport edges; when the overlay is larger than the
/// viewport the leading edge (left/top) wins. The primary axis stays attached
/// to the trigger even if that leaves part of the overlay outside the
/// viewport.
pub fn position(
    trigger: &Rect,
    size: OverlaySize,
    placement: Placement,
    gap: f32,
    viewport: ViewportSize,
    padding: f32,
) -> Rect {
    let centered_left = || {
        let start = trigger.center_x() - size.width / 2.0;
        clamp_axis(start, size.width, viewport.width, padding)
    };
    let centered_top = || {
        let start = trigger.center_y() - size.height / 2.0;
        clamp_axis(start, size.height, viewport.height, padding)
    };

    let (left, top) = match placement {
        Placement::Top => (centered_left(), trigger.top - size.height - gap),
        Placement::Bottom => (centered_left(), trigger.bottom + gap),
        Placement::Left => (trigger.left - size.width - gap, centered_top()),
        Placement::Right => (trigger.right + gap, centered_top()),
    };

    Rect::new(left, top, size.width, size.height)
}

fn clamp_axis(start: f32, extent: f32, limit: f32, padding: f32) -> f32 {
    let mut start = start;
    if start + extent > limit - padding {
        start = limit - extent - padding;
    }
    if start < padding {
        start = padding;
    }
    start
}
