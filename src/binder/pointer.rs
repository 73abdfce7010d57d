//! Terminal pointer adapter.
//!
//! Terminals report raw mouse positions, not enter/leave events. Render code
//! registers the trigger and overlay rects it drew into [`HitRegions`] each
//! frame; [`PointerTracker`] hit-tests crossterm events against them and
//! synthesizes the enter/leave/click events the binder expects.

use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;

use super::{InputEvent, Key, Target};
use crate::id::OverlayId;

/// A rectangular region tied to a trigger or overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HitRegion {
    rect: Rect,
    target: Target,
}

impl HitRegion {
    #[inline]
    fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.rect.x
            && x < self.rect.x.saturating_add(self.rect.width)
            && y >= self.rect.y
            && y < self.rect.y.saturating_add(self.rect.height)
    }
}

/// Trigger and overlay regions drawn in the current frame.
///
/// Regions registered later take priority over earlier ones where they
/// overlap (z-order: later = on top), so overlays should be registered after
/// the triggers beneath them.
#[derive(Debug, Default)]
pub struct HitRegions {
    regions: Vec<HitRegion>,
}

impl HitRegions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all regions. Call at the start of each render cycle.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn register_trigger(&mut self, rect: Rect, id: OverlayId) {
        self.regions.push(HitRegion {
            rect,
            target: Target::Trigger(id),
        });
    }

    pub fn register_overlay(&mut self, rect: Rect, id: OverlayId) {
        self.regions.push(HitRegion {
            rect,
            target: Target::Overlay(id),
        });
    }

    /// Topmost target at the given cell, or [`Target::Outside`].
    pub fn hit_test(&self, x: u16, y: u16) -> Target {
        self.regions
            .iter()
            .rev()
            .find(|region| region.contains(x, y))
            .map(|region| region.target.clone())
            .unwrap_or(Target::Outside)
    }

    /// Rect registered for a trigger, if it was drawn this frame.
    pub fn trigger_rect(&self, id: &OverlayId) -> Option<Rect> {
        self.regions.iter().find_map(|region| match &region.target {
            Target::Trigger(t) if t == id => Some(region.rect),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Converts crossterm events into [`InputEvent`]s, tracking hover state.
#[derive(Debug, Default)]
pub struct PointerTracker {
    hovered: Option<Target>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target currently under the pointer, if any.
    pub fn hovered(&self) -> Option<&Target> {
        self.hovered.as_ref()
    }

    /// Translate one terminal event.
    pub fn translate(&mut self, event: &Event, regions: &HitRegions) -> Vec<InputEvent> {
        match event {
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    self.move_to(regions.hit_test(mouse.column, mouse.row))
                }
                MouseEventKind::Down(MouseButton::Left) => {
                    vec![InputEvent::Click(regions.hit_test(mouse.column, mouse.row))]
                }
                _ => Vec::new(),
            },
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                vec![InputEvent::KeyDown(Key::from(key.code))]
            }
            Event::FocusLost => self.move_to(Target::Outside),
            _ => Vec::new(),
        }
    }

    /// Re-evaluate hover after the regions changed under a stationary pointer.
    pub fn refresh(&mut self, column: u16, row: u16, regions: &HitRegions) -> Vec<InputEvent> {
        self.move_to(regions.hit_test(column, row))
    }

    fn move_to(&mut self, target: Target) -> Vec<InputEvent> {
        let next = match target {
            Target::Outside => None,
            other => Some(other),
        };
        if next == self.hovered {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(previous) = self.hovered.take() {
            events.push(InputEvent::PointerLeave(previous));
        }
        if let Some(current) = next.clone() {
            events.push(InputEvent::PointerEnter(current));
        }
        self.hovered = next;
        events
    }
}
