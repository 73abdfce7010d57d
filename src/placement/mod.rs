//! Overlay placement resolution.
//!
//! Picks the side of a trigger on which an overlay should render, given the
//! trigger's bounding rect, the viewport, and (once it has been laid out) the
//! overlay's own size. The resolver is a pure function and never fails: it
//! always commits to one concrete side, however degenerate the geometry.
//!
//! Two policies coexist:
//!
//! | Mode    | Input            | Policy                                              |
//! |---------|------------------|-----------------------------------------------------|
//! | Precise | overlay size     | bottom if it fits, else roomiest fitting side, else roomiest allowed side |
//! | Legacy  | no overlay size  | bottom if raw space >= minimum, else roomiest of all four sides |
//!
//! Legacy mode does not honor the allowed-placement restriction.

mod position;

pub use position::{position, EDGE_PADDING};


use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::{OverlaySize, Rect, ViewportSize};

// ============================================================================
// Constants
// ============================================================================

/// Clearance required between an overlay and the viewport edges for a side to fit.
pub const SAFE_MARGIN: f32 = 16.0;

/// Raw space below the trigger at which legacy mode commits to bottom.
pub const MINIMUM_SPACE: f32 = 100.0;

// ============================================================================
// Placement
// ============================================================================

/// Side of the trigger on which the overlay is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Top,
    Bottom,
    Left,
    Right,
}

impl Placement {
    /// All sides in scan order. Ties are broken by position in this array.
    pub const ALL: [Placement; 4] = [
        Placement::Top,
        Placement::Bottom,
        Placement::Left,
        Placement::Right,
    ];

    /// Lowercase name, as used for styling attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Top => "top",
            Placement::Bottom => "bottom",
            Placement::Left => "left",
            Placement::Right => "right",
        }
    }

    /// Whether the overlay sits above or below the trigger.
    pub fn is_vertical(&self) -> bool {
        matches!(self, Placement::Top | Placement::Bottom)
    }

    fn bit(self) -> u8 {
        match self {
            Placement::Top => 0b0001,
            Placement::Bottom => 0b0010,
            Placement::Left => 0b0100,
            Placement::Right => 0b1000,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown placement name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown placement '{0}' (expected top, bottom, left or right)")]
pub struct ParsePlacementError(String);

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Placement::Top),
            "bottom" => Ok(Placement::Bottom),
            "left" => Ok(Placement::Left),
            "right" => Ok(Placement::Right),
            _ => Err(ParsePlacementError(s.to_string())),
        }
    }
}

// ============================================================================
// PlacementSet
// ============================================================================

/// Set of sides an overlay may be placed on.
///
/// Iteration always follows [`Placement::ALL`] order regardless of how the
/// set was built. An empty set is never produced: constructing one from no
/// sides yields the full set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Placement>", into = "Vec<Placement>")]
pub struct PlacementSet(u8);

impl PlacementSet {
    const FULL: u8 = 0b1111;

    /// All four sides.
    pub const fn all() -> Self {
        Self(Self::FULL)
    }

    /// A single side. The resolver will always return it in precise mode.
    pub fn only(placement: Placement) -> Self {
        Self(placement.bit())
    }

    pub fn contains(&self, placement: Placement) -> bool {
        self.0 & placement.bit() != 0
    }

    /// Whether every side is allowed.
    pub fn is_unrestricted(&self) -> bool {
        self.0 == Self::FULL
    }

    /// Allowed sides in scan order.
    pub fn iter(&self) -> impl Iterator<Item = Placement> + '_ {
        Placement::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

impl Default for PlacementSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<Placement> for PlacementSet {
    fn from_iter<I: IntoIterator<Item = Placement>>(iter: I) -> Self {
        let bits = iter.into_iter().fold(0u8, |acc, p| acc | p.bit());
        if bits == 0 {
            Self::all()
        } else {
            Self(bits)
        }
    }
}

impl From<Vec<Placement>> for PlacementSet {
    fn from(placements: Vec<Placement>) -> Self {
        placements.into_iter().collect()
    }
}

impl From<&[Placement]> for PlacementSet {
    fn from(placements: &[Placement]) -> Self {
        placements.iter().copied().collect()
    }
}

impl From<PlacementSet> for Vec<Placement> {
    fn from(set: PlacementSet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Debug for PlacementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Raw space between the trigger and each viewport edge, in scan order.
fn raw_spaces(trigger: &Rect, viewport: ViewportSize) -> [(Placement, f32); 4] {
    [
        (Placement::Top, trigger.top),
        (Placement::Bottom, viewport.height - trigger.bottom),
        (Placement::Left, trigger.left),
        (Placement::Right, viewport.width - trigger.right),
    ]
}

/// Whether an overlay of `size` fits entirely on `side` of the trigger,
/// keeping `SAFE_MARGIN` clearance from every viewport edge it approaches.
fn fits(side: Placement, trigger: &Rect, size: OverlaySize, viewport: ViewportSize) -> bool {
    let (vw, vh) = (viewport.width, viewport.height);
    let cross_x = || {
        let cx = trigger.center_x();
        cx - size.width / 2.0 >= SAFE_MARGIN && cx + size.width / 2.0 <= vw - SAFE_MARGIN
    };
    let cross_y = || {
        let cy = trigger.center_y();
        cy - size.height / 2.0 >= SAFE_MARGIN && cy + size.height / 2.0 <= vh - SAFE_MARGIN
    };

    match side {
        Placement::Bottom => trigger.bottom + size.height + SAFE_MARGIN <= vh && cross_x(),
        Placement::Top => trigger.top - size.height - SAFE_MARGIN >= 0.0 && cross_x(),
        Placement::Right => trigger.right + size.width + SAFE_MARGIN <= vw && cross_y(),
        Placement::Left => trigger.left - size.width - SAFE_MARGIN >= 0.0 && cross_y(),
    }
}

/// Roomiest candidate. The first one wins exact ties; NaN space never wins.
fn roomiest(candidates: impl Iterator<Item = (Placement, f32)>) -> Option<Placement> {
    candidates
        .map(|(placement, space)| {
            let space = if space.is_nan() { f32::NEG_INFINITY } else { space };
            (placement, space)
        })
        .fold(None, |best: Option<(Placement, f32)>, cur| match best {
            Some((_, space)) if cur.1 <= space => best,
            _ => Some(cur),
        })
        .map(|(placement, _)| placement)
}

/// Resolve the best side on which to render an overlay.
///
/// # Arguments
/// * `trigger` - Current bounding rect of the trigger
/// * `viewport` - Current viewport size
/// * `overlay` - Rendered overlay size, `None` before the first layout pass
/// * `minimum_space` - Legacy-mode threshold for preferring bottom
/// * `allowed` - Sides the overlay may use (honored in precise mode only)
pub fn resolve(
    trigger: &Rect,
    viewport: ViewportSize,
    overlay: Option<OverlaySize>,
    minimum_space: f32,
    allowed: PlacementSet,
) -> Placement {
    let spaces = raw_spaces(trigger, viewport);

    let Some(size) = overlay else {
        let bottom = spaces[1].1;
        if bottom >= minimum_space {
            return Placement::Bottom;
        }
        return roomiest(spaces.into_iter()).unwrap_or(Placement::Bottom);
    };

    let candidates = || spaces.into_iter().filter(|(p, _)| allowed.contains(*p));

    let fitting: Vec<(Placement, f32)> = candidates()
        .filter(|(p, _)| fits(*p, trigger, size, viewport))
        .collect();
    if fitting.iter().any(|(p, _)| *p == Placement::Bottom) {
        return Placement::Bottom;
    }

    roomiest(fitting.into_iter())
        .or_else(|| roomiest(candidates()))
        .unwrap_or(Placement::Bottom)
}

/// Resolve with the default legacy threshold and no side restriction.
pub fn resolve_unrestricted(
    trigger: &Rect,
    viewport: ViewportSize,
    overlay: Option<OverlaySize>,
) -> Placement {
    resolve(trigger, viewport, overlay, MINIMUM_SPACE, PlacementSet::all())
}
