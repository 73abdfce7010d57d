//! Tracing setup for terminal hosts.
//!
//! A TUI owns stdout, so logs go to a file. The filter is read from
//! `TETHER_LOG` using `EnvFilter` syntax and defaults to `info`.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::OverlayResult;

/// Environment variable holding the log filter.
pub const ENV_LOG: &str = "TETHER_LOG";

const LOG_FILE: &str = "tether.log";

/// Default log directory: `<data dir>/tether`, falling back to the temp dir.
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("tether")
}

/// Build the filter from `TETHER_LOG`, defaulting to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a global subscriber writing to `<dir>/tether.log`.
///
/// Returns the path of the log file. Fails if the directory cannot be
/// created; a subscriber that is already installed is left in place.
pub fn init(dir: &Path) -> OverlayResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = File::create(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .finish()
        .try_init()?;

    tracing::info!(path = %path.display(), "Logging initialized");
    Ok(path)
}
