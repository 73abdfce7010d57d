//! Overlay registry.
//!
//! Owns the host scheduler, the trigger registry and every mounted overlay's
//! controller/binder pair. Hosts talk to overlays only through identifiers:
//! events go in through [`dispatch`](OverlayRegistry::dispatch), scheduler
//! wakeups through [`deliver`](OverlayRegistry::deliver), and any code may
//! dismiss an overlay with [`close`](OverlayRegistry::close).

use std::collections::HashMap;
use std::time::Duration;

use crate::binder::{EventBinder, InputEvent, Propagation};
use crate::config::{EngineConfig, OverlayOptions};
use crate::controller::{ControllerState, InteractionController};
use crate::id::OverlayId;
use crate::locator::TriggerRegistry;
use crate::placement::Placement;
use crate::scheduler::ManualScheduler;
use crate::traits::{LayoutHost, Scheduler, Wakeup};

#[derive(Debug)]
struct Mounted {
    options: OverlayOptions,
    binder: EventBinder,
    ctrl: InteractionController,
}

/// All overlays managed by one host.
#[derive(Debug)]
pub struct OverlayRegistry<S: Scheduler> {
    scheduler: S,
    config: EngineConfig,
    triggers: TriggerRegistry,
    overlays: HashMap<OverlayId, Mounted>,
}

impl<S: Scheduler> OverlayRegistry<S> {
    pub fn new(scheduler: S, config: EngineConfig) -> Self {
        Self {
            scheduler,
            config,
            triggers: TriggerRegistry::new(),
            overlays: HashMap::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Make a trigger discoverable under `id`.
    pub fn register_trigger(&mut self, id: impl Into<OverlayId>) {
        self.triggers.register(id);
    }

    /// Remove a trigger. An overlay bound to it is torn down and detached.
    pub fn unregister_trigger(&mut self, id: &str) {
        if self.triggers.unregister(id).is_none() {
            return;
        }
        if let Some(mut mounted) = self.overlays.remove(id) {
            mounted.ctrl.cleanup(&mut self.scheduler);
            tracing::debug!(id, "Trigger removed; overlay detached");
        }
    }

    /// Bind an overlay to its trigger.
    ///
    /// Returns `false` without side effects when no trigger is registered
    /// under `id`. Mounting again with identical options against the same
    /// trigger keeps the existing controller; anything else tears the old one
    /// down and binds a fresh one.
    pub fn mount(&mut self, id: impl Into<OverlayId>, options: OverlayOptions) -> bool {
        let id = id.into();
        let Some(trigger) = self.triggers.find(id.as_str()) else {
            tracing::trace!(%id, "No trigger registered; overlay left unbound");
            return false;
        };

        if let Some(existing) = self.overlays.get(&id) {
            if existing.options == options && existing.ctrl.trigger() == &trigger {
                return true;
            }
        }
        if let Some(mut previous) = self.overlays.remove(&id) {
            previous.ctrl.cleanup(&mut self.scheduler);
            tracing::debug!(%id, "Rebinding overlay");
        }

        let ctrl = InteractionController::new(trigger, options.allowed, &self.config);
        let binder = EventBinder::new(id.clone(), options.mode);
        tracing::debug!(%id, mode = ?options.mode, "Overlay mounted");
        self.overlays.insert(
            id,
            Mounted {
                options,
                binder,
                ctrl,
            },
        );
        true
    }

    /// Tear down and detach an overlay. Unknown identifiers are ignored.
    pub fn unmount(&mut self, id: &str) {
        if let Some(mut mounted) = self.overlays.remove(id) {
            mounted.ctrl.cleanup(&mut self.scheduler);
            tracing::debug!(id, "Overlay unmounted");
        }
    }

    pub fn is_mounted(&self, id: &str) -> bool {
        self.overlays.contains_key(id)
    }

    /// Immediately hide the overlay registered under `id`.
    ///
    /// Callable from anywhere, e.g. a menu item's action. Unknown identifiers
    /// are a no-op.
    pub fn close(&mut self, id: &str) {
        self.hide(id, false);
    }

    pub fn show(&mut self, id: &str) {
        if let Some(mounted) = self.overlays.get_mut(id) {
            mounted.ctrl.show_overlay(&mut self.scheduler);
        }
    }

    pub fn hide(&mut self, id: &str, deferred: bool) {
        match self.overlays.get_mut(id) {
            Some(mounted) => mounted.ctrl.hide_overlay(deferred, &mut self.scheduler),
            None => tracing::trace!(id, "Hide for unknown overlay ignored"),
        }
    }

    pub fn cancel_hide(&mut self, id: &str) {
        if let Some(mounted) = self.overlays.get_mut(id) {
            mounted.ctrl.cancel_hide(&mut self.scheduler);
        }
    }

    /// Route one input event through every mounted overlay.
    ///
    /// All target-phase handlers run first. Document-phase handlers run only
    /// if none of them stopped propagation.
    pub fn dispatch(&mut self, event: &InputEvent) -> Propagation {
        let mut propagation = Propagation::Continue;
        for mounted in self.overlays.values_mut() {
            if mounted.binder.handle_target(event, &mut mounted.ctrl, &mut self.scheduler)
                == Propagation::Stop
            {
                propagation = Propagation::Stop;
            }
        }
        if propagation == Propagation::Continue {
            for mounted in self.overlays.values_mut() {
                mounted.binder.handle_document(event, &mut mounted.ctrl, &mut self.scheduler);
            }
        }
        propagation
    }

    /// Hand a scheduler wakeup to the controller that requested it.
    ///
    /// Returns `true` if it was current and applied. Wakeups for overlays no
    /// longer mounted are dropped.
    pub fn deliver(&mut self, wakeup: Wakeup, layout: &dyn LayoutHost) -> bool {
        let Some(mounted) = self.overlays.get_mut(wakeup.overlay().as_str()) else {
            tracing::trace!(id = %wakeup.overlay(), "Wakeup for unmounted overlay dropped");
            return false;
        };
        match wakeup {
            Wakeup::Frame { generation, .. } => mounted.ctrl.on_frame(generation, layout),
            Wakeup::HideTimer { token, .. } => mounted.ctrl.on_hide_timer(token),
        }
    }

    /// Run every queued frame continuation against the current layout.
    ///
    /// Call once per layout pass. Returns how many frames were applied.
    pub fn flush_frames(&mut self, layout: &dyn LayoutHost) -> usize {
        let frames = self.scheduler.take_frames();
        frames
            .into_iter()
            .filter(|wakeup| matches!(wakeup, Wakeup::Frame { .. }))
            .map(|wakeup| self.deliver(wakeup, layout))
            .filter(|applied| *applied)
            .count()
    }

    /// Re-resolve placement for every shown overlay, e.g. after a resize.
    ///
    /// Returns how many overlays changed side.
    pub fn reposition(&mut self, layout: &dyn LayoutHost) -> usize {
        self.overlays
            .values_mut()
            .map(|m| m.ctrl.reposition(layout))
            .filter(|changed| *changed)
            .count()
    }

    pub fn is_shown(&self, id: &str) -> bool {
        self.overlays.get(id).is_some_and(|m| m.ctrl.is_shown())
    }

    pub fn placement(&self, id: &str) -> Option<Placement> {
        self.overlays.get(id).and_then(|m| m.ctrl.placement())
    }

    pub fn state(&self, id: &str) -> Option<ControllerState> {
        self.overlays.get(id).map(|m| m.ctrl.state())
    }

    pub fn options(&self, id: &str) -> Option<OverlayOptions> {
        self.overlays.get(id).map(|m| m.options)
    }

    /// Identifiers of overlays currently shown, sorted.
    pub fn shown(&self) -> Vec<&OverlayId> {
        let mut ids: Vec<&OverlayId> = self
            .overlays
            .iter()
            .filter(|(_, m)| m.ctrl.is_shown())
            .map(|(id, _)| id)
            .collect();
        ids.sort();
        ids
    }
}

impl OverlayRegistry<ManualScheduler> {
    /// Advance the virtual clock and deliver every timer that came due.
    pub fn advance(&mut self, by: Duration, layout: &dyn LayoutHost) -> usize {
        let due = self.scheduler.advance(by);
        due.into_iter()
            .map(|wakeup| self.deliver(wakeup, layout))
            .filter(|applied| *applied)
            .count()
    }
}
