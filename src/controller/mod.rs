//! Per-overlay interaction state machine.
//!
//! The controller owns the overlay's visibility flag and committed placement;
//! nothing else may mutate them. Time-dependent work goes through the host
//! [`Scheduler`] as two cancellable continuations:
//!
//! - a next-frame request made by `show_overlay`, which measures the overlay
//!   and commits its placement once a layout pass has happened;
//! - a grace-period timer armed by `hide_overlay(true)`.
//!
//! ```text
//! Closed --show--> Opening --frame--> Open
//! Open --hide(false)--> Closed
//! Open --hide(true)--> OpenPendingClose
//! OpenPendingClose --cancel_hide | show--> Open
//! OpenPendingClose --timer--> Closed
//! OpenPendingClose --hide(false)--> Closed
//! Opening --hide(_)--> Closed
//! ```
//!
//! Every show and hide bumps a generation counter. A frame continuation only
//! applies if its generation is still current, so a superseded request can
//! never overwrite a newer one.

mod state;

pub use state::ControllerState;

use std::time::Duration;

use crate::config::EngineConfig;
use crate::id::OverlayId;
use crate::locator::TriggerHandle;
use crate::placement::{self, Placement, PlacementSet};
use crate::traits::{LayoutHost, Scheduler, TaskHandle, Wakeup};

#[derive(Debug, Clone, Copy)]
struct HideTimer {
    handle: TaskHandle,
    token: u64,
}

/// Interaction controller for one trigger/overlay pair.
#[derive(Debug)]
pub struct InteractionController {
    id: OverlayId,
    trigger: TriggerHandle,
    allowed: PlacementSet,
    hide_delay: Duration,
    minimum_space: f32,

    shown: bool,
    placement: Option<Placement>,

    generation: u64,
    pending_frame: Option<TaskHandle>,
    hide_timer: Option<HideTimer>,
    next_token: u64,
    torn_down: bool,
}

impl InteractionController {
    pub fn new(trigger: TriggerHandle, allowed: PlacementSet, config: &EngineConfig) -> Self {
        Self {
            id: trigger.id().clone(),
            trigger,
            allowed,
            hide_delay: config.hide_delay(),
            minimum_space: config.minimum_space,
            shown: false,
            placement: None,
            generation: 0,
            pending_frame: None,
            hide_timer: None,
            next_token: 0,
            torn_down: false,
        }
    }

    pub fn id(&self) -> &OverlayId {
        &self.id
    }

    pub fn trigger(&self) -> &TriggerHandle {
        &self.trigger
    }

    pub fn allowed(&self) -> PlacementSet {
        self.allowed
    }

    /// Whether the overlay is currently shown.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Last committed placement, `None` until the first frame was applied.
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Current request generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_pending_hide(&self) -> bool {
        self.hide_timer.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn state(&self) -> ControllerState {
        match (self.shown, self.hide_timer.is_some(), self.pending_frame.is_some()) {
            (true, true, _) => ControllerState::OpenPendingClose,
            (true, false, _) => ControllerState::Open,
            (false, _, true) => ControllerState::Opening,
            (false, _, false) => ControllerState::Closed,
        }
    }

    /// Request the overlay be shown.
    ///
    /// Any pending hide is cancelled immediately; measurement, placement and
    /// the visibility flip happen in [`on_frame`](Self::on_frame).
    pub fn show_overlay(&mut self, sched: &mut dyn Scheduler) {
        if self.torn_down {
            tracing::trace!(id = %self.id, "show_overlay on torn-down controller ignored");
            return;
        }
        self.cancel_hide(sched);
        self.supersede_frame(sched);
        let handle = sched.request_frame(Wakeup::Frame {
            overlay: self.id.clone(),
            generation: self.generation,
        });
        self.pending_frame = Some(handle);
        tracing::debug!(id = %self.id, generation = self.generation, "Show requested");
    }

    /// Second phase of `show_overlay`, run after a layout pass.
    ///
    /// Returns `true` if the frame was current and its placement committed.
    pub fn on_frame(&mut self, generation: u64, layout: &dyn LayoutHost) -> bool {
        if self.torn_down || generation != self.generation || self.pending_frame.is_none() {
            tracing::trace!(
                id = %self.id,
                generation,
                current = self.generation,
                "Dropping stale frame"
            );
            return false;
        }
        self.pending_frame = None;

        let Some(trigger_rect) = layout.trigger_rect(&self.id) else {
            tracing::trace!(id = %self.id, "Trigger has no layout; frame dropped");
            return false;
        };
        let overlay_size = layout.overlay_size(&self.id);
        let placement = placement::resolve(
            &trigger_rect,
            layout.viewport(),
            overlay_size,
            self.minimum_space,
            self.allowed,
        );

        self.placement = Some(placement);
        if !self.shown {
            self.shown = true;
        }
        tracing::debug!(
            id = %self.id,
            %placement,
            measured = overlay_size.is_some(),
            "Overlay shown"
        );
        true
    }

    /// Hide the overlay, immediately or after the grace period.
    pub fn hide_overlay(&mut self, deferred: bool, sched: &mut dyn Scheduler) {
        if self.torn_down {
            return;
        }
        self.cancel_hide(sched);
        self.supersede_frame(sched);

        if deferred && self.shown {
            self.next_token += 1;
            let token = self.next_token;
            let handle = sched.start_timer(
                self.hide_delay,
                Wakeup::HideTimer {
                    overlay: self.id.clone(),
                    token,
                },
            );
            self.hide_timer = Some(HideTimer { handle, token });
            tracing::debug!(id = %self.id, delay = ?self.hide_delay, "Hide deferred");
        } else if self.shown {
            self.shown = false;
            tracing::debug!(id = %self.id, "Overlay hidden");
        }
    }

    /// Re-run placement for a shown overlay against the current layout.
    ///
    /// Hosts call this after the viewport or trigger moved. Returns `true`
    /// if the committed placement changed.
    pub fn reposition(&mut self, layout: &dyn LayoutHost) -> bool {
        if self.torn_down || !self.shown {
            return false;
        }
        let Some(trigger_rect) = layout.trigger_rect(&self.id) else {
            return false;
        };
        let placement = placement::resolve(
            &trigger_rect,
            layout.viewport(),
            layout.overlay_size(&self.id),
            self.minimum_space,
            self.allowed,
        );
        if self.placement == Some(placement) {
            return false;
        }
        tracing::debug!(id = %self.id, from = ?self.placement, to = %placement, "Overlay repositioned");
        self.placement = Some(placement);
        true
    }

    /// Grace period elapsed. Returns `true` if this timer was still current.
    pub fn on_hide_timer(&mut self, token: u64) -> bool {
        match self.hide_timer {
            Some(timer) if !self.torn_down && timer.token == token => {
                self.hide_timer = None;
                if self.shown {
                    self.shown = false;
                    tracing::debug!(id = %self.id, "Overlay hidden after grace period");
                }
                true
            }
            _ => {
                tracing::trace!(id = %self.id, token, "Dropping stale hide timer");
                false
            }
        }
    }

    /// Cancel a pending deferred hide. Safe to call with none pending.
    pub fn cancel_hide(&mut self, sched: &mut dyn Scheduler) {
        if let Some(timer) = self.hide_timer.take() {
            sched.cancel(timer.handle);
            tracing::trace!(id = %self.id, "Pending hide cancelled");
        }
    }

    /// Tear down: no frame or timer will ever apply to this controller again.
    pub fn cleanup(&mut self, sched: &mut dyn Scheduler) {
        if self.torn_down {
            return;
        }
        self.cancel_hide(sched);
        self.supersede_frame(sched);
        self.torn_down = true;
        tracing::debug!(id = %self.id, "Controller cleaned up");
    }

    /// Invalidate any in-flight frame continuation.
    fn supersede_frame(&mut self, sched: &mut dyn Scheduler) {
        if let Some(handle) = self.pending_frame.take() {
            sched.cancel(handle);
        }
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{OverlaySize, Rect, ViewportSize};
    use crate::locator::TriggerRegistry;
    use crate::scheduler::ManualScheduler;

    struct Layout {
        trigger: Option<Rect>,
        overlay: Option<OverlaySize>,
        viewport: ViewportSize,
    }

    impl LayoutHost for Layout {
        fn trigger_rect(&self, _: &OverlayId) -> Option<Rect> {
            self.trigger
        }

        fn overlay_size(&self, _: &OverlayId) -> Option<OverlaySize> {
            self.overlay
        }

        fn viewport(&self) -> ViewportSize {
            self.viewport
        }
    }

    fn near_bottom() -> Layout {
        Layout {
            trigger: Some(Rect::from_edges(700.0, 720.0, 100.0, 200.0)),
            overlay: Some(OverlaySize::new(150.0, 120.0)),
            viewport: ViewportSize::new(1024.0, 768.0),
        }
    }

    fn controller() -> InteractionController {
        let handle = TriggerRegistry::new().register("tip");
        InteractionController::new(handle, PlacementSet::all(), &EngineConfig::default())
    }

    /// Deliver queued frames the way a registry would.
    fn run_frames(ctrl: &mut InteractionController, sched: &mut ManualScheduler, layout: &Layout) {
        for wakeup in sched.take_frames() {
            if let Wakeup::Frame { generation, .. } = wakeup {
                ctrl.on_frame(generation, layout);
            }
        }
    }

    fn run_timers(ctrl: &mut InteractionController, sched: &mut ManualScheduler, ms: u64) {
        for wakeup in sched.advance(Duration::from_millis(ms)) {
            if let Wakeup::HideTimer { token, .. } = wakeup {
                ctrl.on_hide_timer(token);
            }
        }
    }

    #[test]
    fn test_show_is_deferred_until_frame() {
        let mut ctrl = controller();
        let mut sched = ManualScheduler::new();

        ctrl.show_overlay(&mut sched);
        assert_eq!(ctrl.state(), ControllerState::Opening);
        assert!(!ctrl.is_shown());

        run_frames(&mut ctrl, &mut sched, &near_bottom());
        assert_eq!(ctrl.state(), ControllerState::Open);
        assert_eq!(ctrl.placement(), Some(Placement::Top));
    }

    #[test]
    fn test_second_show_supersedes_first_frame() {
        let mut ctrl = controller();
        let mut sched = ManualScheduler::new();

        ctrl.show_overlay(&mut sched);
        let stale = ctrl.generation();
        ctrl.show_overlay(&mut sched);

        assert!(!ctrl.on_frame(stale, &near_bottom()));
        assert!(!ctrl.is_shown());
        assert_eq!(sched.pending_frames(), 1);

        run_frames(&mut ctrl, &mut sched, &near_bottom());
        assert!(ctrl.is_shown());
    }

    #[test]
    fn test_hide_before_frame_prevents_opening() {
        let mut ctrl = controller();
        let mut sched = ManualScheduler::new();

        ctrl.show_overlay(&mut sched);
        let generation = ctrl.generation();
        ctrl.hide_overlay(false, &mut sched);

        assert!(!ctrl.on_frame(generation, &near_bottom()));
        assert_eq!(ctrl.state(), ControllerState::Closed);
    }

    #[test]
    fn test_deferred_hide_while_opening_closes_without_timer() {
        let mut ctrl = controller();
        let mut sched = ManualScheduler::new();

        ctrl.show_overlay(&mut sched);
        let generation = ctrl.generation();
        ctrl.hide_overlay(true, &mut sched);

        assert!(!ctrl.has_pending_hide());
        assert_eq!(sched.pending_timers(), 0);
        assert_eq!(ctrl.state(), ControllerState::Closed);
        assert!(!ctrl.on_frame(generation, &near_bottom()));
    }

    #[test]
    fn test_reposition_follows_viewport() {
        let mut ctrl = controller();
        let mut sched = ManualScheduler::new();
        let mut layout = Layout {
            trigger: Some(Rect::from_edges(300.0, 320.0, 100.0, 200.0)),
            overlay: Some(OverlaySize::new(150.0, 120.0)),
            viewport: ViewportSize::new(400.0, 768.0),
        };
        ctrl.show_overlay(&mut sched);
        run_frames(&mut ctrl, &mut sched, &layout);
        assert_eq!(ctrl.placement(), Some(Placement::Bottom));
        assert!(!ctrl.reposition(&layout));

        layout.viewport = ViewportSize::new(400.0, 400.0);
        assert!(ctrl.reposition(&layout));
        assert_eq!(ctrl.placement(), Some(Placement::Top));
        assert_eq!(ctrl.state(), ControllerState::Open);
    }

    #[test]
    fn test_reposition_ignores_closed_overlay() {
        let mut ctrl = controller();
        let mut sched = ManualScheduler::new();
        ctrl.show_overlay(&mut sched);
        assert!(!ctrl.reposition(&near_bottom()));
        assert_eq!(ctrl.placement(), None);
        assert_eq!(ctrl.state(), ControllerState::Opening);
    }

    #[test]
    fn test_deferred_hide_closes_after_delay() {
        let mut ctrl = controller();
        let mut sched = ManualScheduler::new();
        ctrl.show_overlay(&mut sched);
        run_frames(&mut ctrl, &mut sched, &near_bottom());

        ctrl.hide_overlay(true, &mut sched);
        assert_eq!(ctrl.state(), ControllerState::OpenPendingClose);

        run_timers(&mut ctrl, &mut sched, 99);
        assert!(ctrl.is_shown());
        run_timers(&mut ctrl, &mut sched, 1);
        assert_eq!(ctrl.state(), ControllerState::Closed);
    }

    #[test]
    fn test_rearming_keeps_a_single_timer() {
        let mut ctrl = controller();
        let mut sched = ManualScheduler::new();
        ctrl.show_overlay(&mut sched);
        run_frames(&mut ctrl, &mut sched, &near_bottom());

        ctrl.hide_overlay(true, &mut sched);
        run_timers(&mut ctrl, &mut sched, 60);
        ctrl.hide_overlay(true, &mut sched);
        assert_eq!(sched.pending_timers(), 1);

        run_timers(&mut ctrl, &mut sched, 60);
        assert!(ctrl.is_shown(), "re-armed timer restarts the grace period");
        run_timers(&mut ctrl, &mut sched, 40);
        assert!(!ctrl.is_shown());
    }

    #[test]
    fn test_cancel_hide_keeps_overlay_open() {
        let mut ctrl = controller();
        let mut sched = ManualScheduler::new();
        ctrl.show_overlay(&mut sched);
        run_frames(&mut ctrl, &mut sched, &near_bottom());

        ctrl.hide_overlay(true, &mut sched);
        ctrl.cancel_hide(&mut sched);
        assert_eq!(ctrl.state(), ControllerState::Open);
        assert_eq!(sched.pending_timers(), 0);

        run_timers(&mut ctrl, &mut sched, 500);
        assert!(ctrl.is_shown());
    }

    #[test]
    fn test_show_cancels_pending_hide() {
        let mut ctrl = controller();
        let mut sched = ManualScheduler::new();
        ctrl.show_overlay(&mut sched);
        run_frames(&mut ctrl, &mut sched, &near_bottom());

        ctrl.hide_overlay(true, &mut sched);
        ctrl.show_overlay(&mut sched);
        assert!(!ctrl.has_pending_hide());
        assert_eq!(ctrl.state(), ControllerState::Open);
    }

    #[test]
    fn test_immediate_hide_clears_pending_timer() {
        let mut ctrl = controller();
        let mut sched = ManualScheduler::new();
        ctrl.show_overlay(&mut sched);
        run_frames(&mut ctrl, &mut sched, &near_bottom());

        ctrl.hide_overlay(true, &mut sched);
        ctrl.hide_overlay(false, &mut sched);
        assert_eq!(ctrl.state(), ControllerState::Closed);
        assert_eq!(sched.pending_timers(), 0);
    }

    #[test]
    fn test_idempotent_calls_when_idle() {
        let mut ctrl = controller();
        let mut sched = ManualScheduler::new();

        ctrl.cancel_hide(&mut sched);
        ctrl.hide_overlay(false, &mut sched);
        ctrl.hide_overlay(false, &mut sched);
        ctrl.cancel_hide(&mut sched);
        assert_eq!(ctrl.state(), ControllerState::Closed);
    }

    #[test]
    fn test_cleanup_drops_everything_in_flight() {
        let mut ctrl = controller();
        let mut sched = ManualScheduler::new();
        ctrl.show_overlay(&mut sched);
        run_frames(&mut ctrl, &mut sched, &near_bottom());
        ctrl.hide_overlay(true, &mut sched);

        ctrl.cleanup(&mut sched);
        ctrl.cleanup(&mut sched);
        assert!(ctrl.is_torn_down());
        assert_eq!(sched.pending_timers(), 0);

        ctrl.show_overlay(&mut sched);
        assert_eq!(sched.pending_frames(), 0);
        assert!(!ctrl.on_hide_timer(1));
    }

    #[test]
    fn test_frame_without_trigger_layout_is_dropped() {
        let mut ctrl = controller();
        let mut sched = ManualScheduler::new();
        ctrl.show_overlay(&mut sched);
        let layout = Layout {
            trigger: None,
            overlay: None,
            viewport: ViewportSize::new(1024.0, 768.0),
        };
        run_frames(&mut ctrl, &mut sched, &layout);
        assert_eq!(ctrl.state(), ControllerState::Closed);
    }

    #[test]
    fn test_unmeasured_overlay_uses_legacy_placement() {
        let mut ctrl = controller();
        let mut sched = ManualScheduler::new();
        ctrl.show_overlay(&mut sched);
        let layout = Layout {
            trigger: Some(Rect::from_edges(10.0, 30.0, 10.0, 60.0)),
            overlay: None,
            viewport: ViewportSize::new(1024.0, 768.0),
        };
        run_frames(&mut ctrl, &mut sched, &layout);
        assert_eq!(ctrl.placement(), Some(Placement::Bottom));
    }
}
