//! Viewport geometry primitives.
//!
//! All coordinates are viewport-relative and expressed as `f32` so that
//! degenerate layouts (negative offsets, triggers scrolled partially out of
//! view) can be represented without wrapping. Terminal hosts convert from
//! `ratatui::layout::Rect` cell coordinates.

use serde::{Deserialize, Serialize};

/// A bounding rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a rect from its origin and size.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            bottom: top + height,
            left,
            right: left + width,
            width,
            height,
        }
    }

    /// Create a rect from its four edges.
    pub fn from_edges(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Horizontal midpoint.
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    /// Vertical midpoint.
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }

    /// Check if a point lies within this rect (right and bottom edges exclusive).
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

impl From<ratatui::layout::Rect> for Rect {
    fn from(rect: ratatui::layout::Rect) -> Self {
        Rect::new(
            f32::from(rect.x),
            f32::from(rect.y),
            f32::from(rect.width),
            f32::from(rect.height),
        )
    }
}

impl From<Rect> for ratatui::layout::Rect {
    /// Round to terminal cells, clipping whatever lies at negative coordinates.
    fn from(rect: Rect) -> Self {
        let to_cell = |v: f32| v.round().clamp(0.0, f32::from(u16::MAX)) as u16;
        let (left, top) = (to_cell(rect.left), to_cell(rect.top));
        ratatui::layout::Rect::new(
            left,
            top,
            to_cell(rect.right).saturating_sub(left),
            to_cell(rect.bottom).saturating_sub(top),
        )
    }
}

/// Size of the host viewport, read at the moment of computation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl From<ratatui::layout::Rect> for ViewportSize {
    fn from(area: ratatui::layout::Rect) -> Self {
        Self::new(
            f32::from(area.x) + f32::from(area.width),
            f32::from(area.y) + f32::from(area.height),
        )
    }
}

/// Rendered size of an overlay after at least one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OverlaySize {
    pub width: f32,
    pub height: f32,
}

impl OverlaySize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_new_derives_edges() {
        let rect = Rect::new(100.0, 700.0, 100.0, 20.0);
        assert_eq!(rect.right, 200.0);
        assert_eq!(rect.bottom, 720.0);
        assert_eq!(rect.center_x(), 150.0);
        assert_eq!(rect.center_y(), 710.0);
    }

    #[test]
    fn test_rect_from_edges_derives_size() {
        let rect = Rect::from_edges(10.0, 30.0, 5.0, 45.0);
        assert_eq!(rect.width, 40.0);
        assert_eq!(rect.height, 20.0);
    }

    #[test]
    fn test_contains_is_exclusive_on_far_edges() {
        let rect = Rect::new(0.0, 0.0, 10.0, 2.0);
        assert!(rect.contains(0.0, 0.0));
        assert!(rect.contains(9.0, 1.0));
        assert!(!rect.contains(10.0, 1.0));
        assert!(!rect.contains(5.0, 2.0));
    }

    #[test]
    fn test_ratatui_round_trip_clips_negative() {
        let cells: ratatui::layout::Rect = Rect::new(-3.0, 2.4, 8.0, 3.0).into();
        assert_eq!(cells.x, 0);
        assert_eq!(cells.y, 2);
        assert_eq!(cells.width, 5);
        assert_eq!(cells.height, 3);

        let offscreen: ratatui::layout::Rect = Rect::new(4.0, -6.0, 8.0, 5.0).into();
        assert_eq!(offscreen.height, 0);

        let back = Rect::from(ratatui::layout::Rect::new(4, 5, 6, 7));
        assert_eq!(back.right, 10.0);
        assert_eq!(back.bottom, 12.0);
    }

    #[test]
    fn test_viewport_from_terminal_area() {
        let viewport = ViewportSize::from(ratatui::layout::Rect::new(0, 0, 80, 24));
        assert_eq!(viewport, ViewportSize::new(80.0, 24.0));
    }
}
