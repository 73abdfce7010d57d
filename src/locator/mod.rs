//! Trigger lookup.
//!
//! Two strategies are provided:
//!
//! - [`find_trigger`] walks a host element tree: starting at the overlay's
//!   container it searches each ancestor's subtree for the tagged trigger,
//!   stopping at the root boundary. Triggers rendered outside the overlay's
//!   ancestor chain are not found.
//! - [`TriggerRegistry`] maps identifiers to triggers registered at mount
//!   time, so no tree walk is needed at all. The overlay registry uses this.

mod registry;

pub use registry::{TriggerHandle, TriggerRegistry};

/// Minimal view of a host element tree.
pub trait ElementTree {
    type Node: Clone;

    /// Parent of `node`, `None` at the top of the tree.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// First descendant of `scope` tagged with `tag`, in document order.
    fn find_tagged(&self, scope: &Self::Node, tag: &str) -> Option<Self::Node>;

    /// Whether `node` is the boundary at which the upward walk stops.
    fn is_root(&self, node: &Self::Node) -> bool;
}

/// Find the trigger tagged `id` for the overlay at `overlay`.
///
/// Returns the first match found while walking up from the overlay's
/// immediate container, or `None` once the root boundary has been searched.
pub fn find_trigger<T: ElementTree>(tree: &T, overlay: &T::Node, id: &str) -> Option<T::Node> {
    let mut ancestor = tree.parent(overlay);
    while let Some(node) = ancestor {
        if let Some(trigger) = tree.find_tagged(&node, id) {
            return Some(trigger);
        }
        if tree.is_root(&node) {
            break;
        }
        ancestor = tree.parent(&node);
    }
    tracing::trace!(id, "No trigger found within the overlay's ancestor chain");
    None
}
