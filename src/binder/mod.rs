//! Input event wiring.
//!
//! An [`EventBinder`] is a thin adapter that maps abstract input events to
//! [`InteractionController`] method calls according to the overlay's
//! [`InteractionMode`]. It holds no state of its own; rebinding is simply
//! building a new binder alongside a new controller.
//!
//! Dispatch mirrors DOM bubbling in two phases:
//!
//! 1. **Target** - handlers bound on the trigger and overlay elements. A
//!    handler may return [`Propagation::Stop`].
//! 2. **Document** - document-level handlers (outside click, Escape). Skipped
//!    entirely when any target handler stopped propagation.

mod pointer;

pub use pointer::{HitRegions, PointerTracker};

use serde::{Deserialize, Serialize};

use crate::controller::InteractionController;
use crate::id::OverlayId;
use crate::traits::Scheduler;

/// How an overlay responds to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Tooltip-style: shown on hover or focus, hidden after a grace period.
    #[default]
    Hover,
    /// Menu-style: click to toggle, dismissed by outside click or Escape.
    Persisted,
}

/// What an input event landed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Trigger(OverlayId),
    Overlay(OverlayId),
    Outside,
}

impl Target {
    /// Whether this target is inside the trigger or the overlay of `id`.
    pub fn belongs_to(&self, id: &OverlayId) -> bool {
        match self {
            Target::Trigger(t) | Target::Overlay(t) => t == id,
            Target::Outside => false,
        }
    }
}

/// Keys the binder distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Char(char),
    Other,
}

impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Esc => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        }
    }
}

/// Platform-independent input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    PointerEnter(Target),
    PointerLeave(Target),
    /// Keyboard focus moved onto the trigger of an overlay.
    Focus(OverlayId),
    /// Keyboard focus left the trigger of an overlay.
    Blur(OverlayId),
    Click(Target),
    KeyDown(Key),
}

/// Whether an event continues to document-level handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Maps input events for one overlay onto its controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBinder {
    id: OverlayId,
    mode: InteractionMode,
}

impl EventBinder {
    pub fn new(id: OverlayId, mode: InteractionMode) -> Self {
        Self { id, mode }
    }

    pub fn id(&self) -> &OverlayId {
        &self.id
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Run handlers bound on this overlay's trigger and overlay elements.
    pub fn handle_target(
        &self,
        event: &InputEvent,
        ctrl: &mut InteractionController,
        sched: &mut dyn Scheduler,
    ) -> Propagation {
        match self.mode {
            InteractionMode::Hover => {
                self.hover(event, ctrl, sched);
                Propagation::Continue
            }
            InteractionMode::Persisted => self.persisted_target(event, ctrl, sched),
        }
    }

    /// Run this overlay's document-level handlers.
    pub fn handle_document(
        &self,
        event: &InputEvent,
        ctrl: &mut InteractionController,
        sched: &mut dyn Scheduler,
    ) {
        if self.mode != InteractionMode::Persisted || !ctrl.is_shown() {
            return;
        }
        match event {
            InputEvent::Click(target) if !target.belongs_to(&self.id) => {
                tracing::debug!(id = %self.id, "Outside click dismisses overlay");
                ctrl.hide_overlay(false, sched);
            }
            InputEvent::KeyDown(Key::Escape) => {
                tracing::debug!(id = %self.id, "Escape dismisses overlay");
                ctrl.hide_overlay(false, sched);
            }
            _ => {}
        }
    }

    fn hover(&self, event: &InputEvent, ctrl: &mut InteractionController, sched: &mut dyn Scheduler) {
        match event {
            InputEvent::PointerEnter(Target::Trigger(id)) if *id == self.id => ctrl.show_overlay(sched),
            InputEvent::Focus(id) if *id == self.id => ctrl.show_overlay(sched),
            InputEvent::PointerLeave(Target::Trigger(id)) if *id == self.id => {
                ctrl.hide_overlay(true, sched)
            }
            InputEvent::Blur(id) if *id == self.id => ctrl.hide_overlay(true, sched),
            InputEvent::PointerEnter(Target::Overlay(id)) if *id == self.id => ctrl.cancel_hide(sched),
            InputEvent::PointerLeave(Target::Overlay(id)) if *id == self.id => {
                ctrl.hide_overlay(true, sched)
            }
            _ => {}
        }
    }

    fn persisted_target(
        &self,
        event: &InputEvent,
        ctrl: &mut InteractionController,
        sched: &mut dyn Scheduler,
    ) -> Propagation {
        match event {
            InputEvent::Click(Target::Trigger(id)) if *id == self.id => {
                if ctrl.is_shown() {
                    ctrl.hide_overlay(false, sched);
                } else {
                    ctrl.show_overlay(sched);
                }
                Propagation::Stop
            }
            _ => Propagation::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::geometry::{OverlaySize, Rect, ViewportSize};
    use crate::locator::TriggerRegistry;
    use crate::placement::PlacementSet;
    use crate::scheduler::ManualScheduler;
    use crate::traits::{LayoutHost, Wakeup};
    use std::time::Duration;

    struct Layout;

    impl LayoutHost for Layout {
        fn trigger_rect(&self, _: &OverlayId) -> Option<Rect> {
            Some(Rect::new(10.0, 2.0, 10.0, 1.0))
        }

        fn overlay_size(&self, _: &OverlayId) -> Option<OverlaySize> {
            Some(OverlaySize::new(20.0, 3.0))
        }

        fn viewport(&self) -> ViewportSize {
            ViewportSize::new(80.0, 24.0)
        }
    }

    struct Fixture {
        binder: EventBinder,
        ctrl: InteractionController,
        sched: ManualScheduler,
    }

    impl Fixture {
        fn new(mode: InteractionMode) -> Self {
            let handle = TriggerRegistry::new().register("ov");
            Self {
                binder: EventBinder::new(OverlayId::from("ov"), mode),
                ctrl: InteractionController::new(handle, PlacementSet::all(), &EngineConfig::default()),
                sched: ManualScheduler::new(),
            }
        }

        fn send(&mut self, event: InputEvent) {
            let propagation = self.binder.handle_target(&event, &mut self.ctrl, &mut self.sched);
            if propagation == Propagation::Continue {
                self.binder.handle_document(&event, &mut self.ctrl, &mut self.sched);
            }
            for wakeup in self.sched.take_frames() {
                if let Wakeup::Frame { generation, .. } = wakeup {
                    self.ctrl.on_frame(generation, &Layout);
                }
            }
        }

        fn wait(&mut self, ms: u64) {
            for wakeup in self.sched.advance(Duration::from_millis(ms)) {
                if let Wakeup::HideTimer { token, .. } = wakeup {
                    self.ctrl.on_hide_timer(token);
                }
            }
        }
    }

    fn trigger() -> Target {
        Target::Trigger(OverlayId::from("ov"))
    }

    fn overlay() -> Target {
        Target::Overlay(OverlayId::from("ov"))
    }

    #[test]
    fn test_hover_enter_leave() {
        let mut fx = Fixture::new(InteractionMode::Hover);
        fx.send(InputEvent::PointerEnter(trigger()));
        assert!(fx.ctrl.is_shown());

        fx.send(InputEvent::PointerLeave(trigger()));
        assert!(fx.ctrl.is_shown());
        fx.wait(100);
        assert!(!fx.ctrl.is_shown());
    }

    #[test]
    fn test_hover_focus_blur_match_enter_leave() {
        let mut fx = Fixture::new(InteractionMode::Hover);
        fx.send(InputEvent::Focus(OverlayId::from("ov")));
        assert!(fx.ctrl.is_shown());
        fx.send(InputEvent::Blur(OverlayId::from("ov")));
        assert!(fx.ctrl.has_pending_hide());
    }

    #[test]
    fn test_hover_ignores_other_overlays_and_clicks() {
        let mut fx = Fixture::new(InteractionMode::Hover);
        fx.send(InputEvent::PointerEnter(Target::Trigger(OverlayId::from("other"))));
        fx.send(InputEvent::Click(trigger()));
        fx.send(InputEvent::KeyDown(Key::Escape));
        assert!(!fx.ctrl.is_shown());
    }

    #[test]
    fn test_hover_overlay_enter_cancels_hide() {
        let mut fx = Fixture::new(InteractionMode::Hover);
        fx.send(InputEvent::PointerEnter(trigger()));
        fx.send(InputEvent::PointerLeave(trigger()));
        fx.wait(50);
        fx.send(InputEvent::PointerEnter(overlay()));
        fx.wait(200);
        assert!(fx.ctrl.is_shown());

        fx.send(InputEvent::PointerLeave(overlay()));
        fx.wait(100);
        assert!(!fx.ctrl.is_shown());
    }

    #[test]
    fn test_persisted_trigger_click_toggles_and_stops() {
        let mut fx = Fixture::new(InteractionMode::Persisted);
        let propagation = fx.binder.handle_target(&InputEvent::Click(trigger()), &mut fx.ctrl, &mut fx.sched);
        assert_eq!(propagation, Propagation::Stop);
        assert_eq!(fx.ctrl.state(), crate::controller::ControllerState::Opening);
    }

    #[test]
    fn test_persisted_toggle_off() {
        let mut fx = Fixture::new(InteractionMode::Persisted);
        fx.send(InputEvent::Click(trigger()));
        assert!(fx.ctrl.is_shown());
        fx.send(InputEvent::Click(trigger()));
        assert!(!fx.ctrl.is_shown());
    }

    #[test]
    fn test_persisted_outside_click_and_escape() {
        let mut fx = Fixture::new(InteractionMode::Persisted);
        fx.send(InputEvent::Click(trigger()));
        fx.send(InputEvent::Click(overlay()));
        assert!(fx.ctrl.is_shown(), "click inside overlay keeps it open");

        fx.send(InputEvent::Click(Target::Outside));
        assert!(!fx.ctrl.is_shown());

        fx.send(InputEvent::Click(trigger()));
        fx.send(InputEvent::KeyDown(Key::Char('q')));
        assert!(fx.ctrl.is_shown());
        fx.send(InputEvent::KeyDown(Key::Escape));
        assert!(!fx.ctrl.is_shown());
    }

    #[test]
    fn test_persisted_ignores_hover() {
        let mut fx = Fixture::new(InteractionMode::Persisted);
        fx.send(InputEvent::PointerEnter(trigger()));
        fx.send(InputEvent::Focus(OverlayId::from("ov")));
        assert!(!fx.ctrl.is_shown());
    }

    #[test]
    fn test_key_from_crossterm() {
        use crossterm::event::KeyCode;
        assert_eq!(Key::from(KeyCode::Esc), Key::Escape);
        assert_eq!(Key::from(KeyCode::Char('x')), Key::Char('x'));
        assert_eq!(Key::from(KeyCode::F(1)), Key::Other);
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::to_string(&InteractionMode::Persisted).unwrap(), r#""persisted""#);
        assert_eq!(InteractionMode::default(), InteractionMode::Hover);
    }
}
