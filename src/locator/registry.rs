//! Identifier-keyed trigger registry.

use std::collections::HashMap;

use crate::id::OverlayId;

/// A registered trigger.
///
/// Every registration mints a new serial, so a handle captured before the
/// trigger was re-registered compares unequal to the current one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriggerHandle {
    id: OverlayId,
    serial: u64,
}

impl TriggerHandle {
    pub fn id(&self) -> &OverlayId {
        &self.id
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }
}

/// Triggers currently mounted, keyed by the overlay identifier they drive.
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    triggers: HashMap<OverlayId, TriggerHandle>,
    next_serial: u64,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the trigger for `id`, replacing any previous registration.
    pub fn register(&mut self, id: impl Into<OverlayId>) -> TriggerHandle {
        let id = id.into();
        self.next_serial += 1;
        let handle = TriggerHandle {
            id: id.clone(),
            serial: self.next_serial,
        };
        if self.triggers.insert(id, handle.clone()).is_some() {
            tracing::debug!(id = %handle.id, "Trigger re-registered");
        }
        handle
    }

    /// Remove the trigger for `id`.
    pub fn unregister(&mut self, id: &str) -> Option<TriggerHandle> {
        self.triggers.remove(id)
    }

    /// Look up the trigger for `id`.
    pub fn find(&self, id: &str) -> Option<TriggerHandle> {
        self.triggers.get(id).cloned()
    }

    /// Whether `handle` is still the registered trigger for its identifier.
    pub fn is_current(&self, handle: &TriggerHandle) -> bool {
        self.triggers.get(handle.id.as_str()) == Some(handle)
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}
