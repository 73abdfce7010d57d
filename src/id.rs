//! Overlay identifiers.
//!
//! Identifiers are always supplied by the caller; the crate never mints them
//! from a shared counter.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// String identifier linking an overlay to its trigger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlayId(String);

impl OverlayId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OverlayId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OverlayId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for OverlayId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
