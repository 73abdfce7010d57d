//! Engine and per-overlay configuration.
//!
//! `EngineConfig` holds the tunables shared by every overlay (grace period,
//! legacy placement threshold, positioning gap). It can be built in code,
//! parsed from JSON, loaded from a file, and overridden from the environment.
//!
//! # Example
//!
//! ```ignore
//! use tether::config::EngineConfig;
//!
//! let config = EngineConfig::default()
//!     .with_hide_delay_ms(150)
//!     .with_gap(1.0)
//!     .with_env_overrides();
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::binder::InteractionMode;
use crate::error::{OverlayError, OverlayResult};
use crate::placement::{PlacementSet, EDGE_PADDING, MINIMUM_SPACE};

/// Environment variable overriding the hover grace period, in milliseconds.
pub const ENV_HIDE_DELAY_MS: &str = "TETHER_HIDE_DELAY_MS";
/// Environment variable overriding the legacy placement threshold.
pub const ENV_MINIMUM_SPACE: &str = "TETHER_MINIMUM_SPACE";
/// Environment variable overriding the trigger/overlay gap.
pub const ENV_GAP: &str = "TETHER_GAP";

/// Default hover grace period.
pub const DEFAULT_HIDE_DELAY_MS: u64 = 100;

/// Tunables shared by every overlay managed by one registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Grace period before a deferred hide takes effect (default: 100)
    pub hide_delay_ms: u64,
    /// Raw bottom space at which size-less placement commits to bottom (default: 100)
    pub minimum_space: f32,
    /// Distance between trigger and overlay when positioning (default: 1)
    pub gap: f32,
    /// Clearance between a positioned overlay and the viewport edges (default: 8)
    pub edge_padding: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hide_delay_ms: DEFAULT_HIDE_DELAY_MS,
            minimum_space: MINIMUM_SPACE,
            gap: 1.0,
            edge_padding: EDGE_PADDING,
        }
    }
}

impl EngineConfig {
    /// Create a new EngineConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hover grace period.
    pub fn with_hide_delay_ms(mut self, ms: u64) -> Self {
        self.hide_delay_ms = ms;
        self
    }

    /// Set the legacy placement threshold.
    pub fn with_minimum_space(mut self, space: f32) -> Self {
        self.minimum_space = space;
        self
    }

    /// Set the trigger/overlay gap.
    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Set the viewport edge padding.
    pub fn with_edge_padding(mut self, padding: f32) -> Self {
        self.edge_padding = padding;
        self
    }

    /// Grace period as a `Duration`.
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> OverlayResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> OverlayResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| OverlayError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&contents)?;
        tracing::debug!(path = %path.display(), ?config, "Loaded engine config");
        Ok(config)
    }

    /// Apply `TETHER_*` environment overrides. Unparseable values are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(ENV_HIDE_DELAY_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.hide_delay_ms = ms,
                Err(_) => tracing::warn!(var = ENV_HIDE_DELAY_MS, value = %raw, "Ignoring invalid override"),
            }
        }
        if let Some(space) = parse_non_negative(&lookup, ENV_MINIMUM_SPACE) {
            self.minimum_space = space;
        }
        if let Some(gap) = parse_non_negative(&lookup, ENV_GAP) {
            self.gap = gap;
        }
        self
    }

    /// Reject non-finite or negative geometry values.
    pub fn validate(&self) -> OverlayResult<()> {
        check_non_negative("minimum_space", self.minimum_space)?;
        check_non_negative("gap", self.gap)?;
        check_non_negative("edge_padding", self.edge_padding)?;
        Ok(())
    }
}

fn check_non_negative(field: &'static str, value: f32) -> OverlayResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(OverlayError::InvalidValue {
            field,
            reason: format!("expected a finite non-negative number, got {}", value),
        })
    }
}

fn parse_non_negative(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Option<f32> {
    let raw = lookup(var)?;
    match raw.trim().parse::<f32>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        _ => {
            tracing::warn!(var, value = %raw, "Ignoring invalid override");
            None
        }
    }
}

/// Per-overlay wiring options.
///
/// Changing either field on a mounted overlay tears down its controller and
/// binds a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayOptions {
    /// Interaction pattern (default: hover)
    pub mode: InteractionMode,
    /// Sides the overlay may be placed on (default: all)
    pub allowed: PlacementSet,
}

impl OverlayOptions {
    pub fn new(mode: InteractionMode) -> Self {
        Self {
            mode,
            allowed: PlacementSet::all(),
        }
    }

    /// Tooltip-style options.
    pub fn hover() -> Self {
        Self::new(InteractionMode::Hover)
    }

    /// Menu-style options.
    pub fn persisted() -> Self {
        Self::new(InteractionMode::Persisted)
    }

    /// Restrict the sides the overlay may use.
    pub fn with_allowed(mut self, allowed: impl Into<PlacementSet>) -> Self {
        self.allowed = allowed.into();
        self
    }
}
