//! Constructor configuration for the store.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default reload cadence in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: i64 = 500;

/// Options accepted when opening a store.
///
/// All fields have defaults to allow minimal callers. The poll interval
/// is strictly per-instance: two stores watching different files may
/// run on different cadences.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchOptions {
    /// Location of the config file. Created (with any missing parent
    /// directories) if absent.
    pub file_path: PathBuf,

    /// Reload cadence in milliseconds. Negative disables background
    /// polling entirely: the store becomes a one-shot static snapshot.
    pub poll_interval_ms: i64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from("dynamic.conf"),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WatchOptions {
    /// The poll cadence, or `None` when polling is disabled.
    pub fn poll_interval(&self) -> Option<Duration> {
        u64::try_from(self.poll_interval_ms)
            .ok()
            .map(Duration::from_millis)
    }
}
