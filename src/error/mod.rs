//! Error handling for the overlay engine.
//!
//! Interaction paths (showing, hiding, placement, dispatch) never fail: a
//! missing trigger, an unknown identifier or a stale timer are silent no-ops.
//! Errors only surface from the engine's outer edges:
//!
//! | Category | Source | Recoverable |
//! |----------|--------|-------------|
//! | Configuration | invalid config file or JSON | Yes (defaults apply) |
//! | System | file and terminal I/O, logging setup | Sometimes |
//! | Client | scheduler channel closed | No |

mod category;
mod overlay_error;
mod result;

pub use category::ErrorCategory;
pub use overlay_error::OverlayError;
pub use result::{OverlayResult, ResultExt};
