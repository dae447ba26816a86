//! The typed store and its change-detection poll loop.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use tokio::task::JoinHandle;

use crate::config::fingerprint::Fingerprint;
use crate::config::loader::{self, ConfigError};
use crate::config::parser;
use crate::config::schema::WatchOptions;
use crate::config::table::{ConfigTable, ConfigValue};
use crate::lifecycle::shutdown::{StopReceiver, StopSignal};

/// A typed configuration store kept in sync with a file on disk.
///
/// Readers call the typed getters from any thread. The poll loop owns
/// all file I/O and replaces the snapshot wholesale behind a single
/// `ArcSwap`, so a reader observes the tables entirely-before or
/// entirely-after a reload, never mixed.
pub struct DynamicConfig {
    shared: Arc<Shared>,
    stop: StopSignal,
    poller: Option<JoinHandle<()>>,
}

/// State shared between the store handle and its poll task.
struct Shared {
    path: PathBuf,
    snapshot: ArcSwap<ConfigTable>,
    pending_write: AtomicBool,
}

impl DynamicConfig {
    /// Open the store: create the file (and any missing parent
    /// directories) if absent, load it synchronously, and start the
    /// poll loop when `options.poll_interval_ms` is non-negative.
    ///
    /// The first getter call after `open` returns is consistent with
    /// the file's contents at construction time. Must be called within
    /// a Tokio runtime when polling is enabled.
    pub fn open(options: WatchOptions) -> Result<Self, ConfigError> {
        loader::ensure_file(&options.file_path)?;
        let (table, fingerprint) = loader::load_snapshot(&options.file_path)?;
        let interval = options.poll_interval();

        let shared = Arc::new(Shared {
            path: options.file_path,
            snapshot: ArcSwap::from_pointee(table),
            pending_write: AtomicBool::new(false),
        });
        let stop = StopSignal::new();

        let poller = match interval {
            Some(interval) => {
                tracing::info!(
                    path = %shared.path.display(),
                    interval_ms = interval.as_millis() as u64,
                    "Starting config poll loop"
                );
                Some(tokio::spawn(poll_loop(
                    shared.clone(),
                    fingerprint,
                    interval,
                    stop.subscribe(),
                )))
            }
            None => {
                tracing::info!(
                    path = %shared.path.display(),
                    "Polling disabled, configuration is a static snapshot"
                );
                None
            }
        };

        Ok(Self {
            shared,
            stop,
            poller,
        })
    }

    /// The watched file path.
    pub fn path(&self) -> &Path {
        &self.shared.path
    }

    /// Look up a boolean by key. A miss is `None`, never an error.
    pub fn get_boolean(&self, key: &str) -> Option<bool> {
        self.shared.snapshot.load().boolean(key)
    }

    /// Look up a string by key.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.shared.snapshot.load().string(key).map(str::to_owned)
    }

    /// Look up an integer by key.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.shared.snapshot.load().integer(key)
    }

    /// Look up a double by key.
    pub fn get_double(&self, key: &str) -> Option<f64> {
        self.shared.snapshot.load().double(key)
    }

    /// The current snapshot as a whole, for reads that must be
    /// consistent across types and for identity comparisons.
    pub fn snapshot(&self) -> Arc<ConfigTable> {
        self.shared.snapshot.load_full()
    }

    /// Set a boolean locally and mark it for flushing.
    pub fn set_boolean(&self, key: impl Into<String>, value: bool) {
        self.shared.set(key.into(), ConfigValue::Boolean(value));
    }

    /// Set a string locally and mark it for flushing.
    pub fn set_string(&self, key: impl Into<String>, value: impl Into<String>) {
        self.shared.set(key.into(), ConfigValue::String(value.into()));
    }

    /// Set an integer locally and mark it for flushing.
    pub fn set_int(&self, key: impl Into<String>, value: i64) {
        self.shared.set(key.into(), ConfigValue::Integer(value));
    }

    /// Set a double locally and mark it for flushing.
    pub fn set_double(&self, key: impl Into<String>, value: f64) {
        self.shared.set(key.into(), ConfigValue::Double(value));
    }

    /// Whether a local mutation is waiting to be flushed.
    pub fn has_pending_write(&self) -> bool {
        self.shared.pending_write.load(Ordering::SeqCst)
    }

    /// Request the poll loop to exit after its current cycle. A store
    /// opened without polling has no loop; calling this is a no-op.
    pub fn stop(&self) {
        self.stop.trigger();
    }

    /// True while the poll loop is still running.
    pub fn is_polling(&self) -> bool {
        self.poller
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for DynamicConfig {
    fn drop(&mut self) {
        // Retire the poll task; a dropped handle must not leak its loop.
        self.stop.trigger();
    }
}

impl Shared {
    /// Replace the published snapshot.
    fn publish(&self, table: ConfigTable) {
        self.snapshot.store(Arc::new(table));
    }

    /// Apply a local mutation and raise the pending-write flag.
    fn set(&self, key: String, value: ConfigValue) {
        self.snapshot.rcu(|current| {
            let mut next = (**current).clone();
            next.insert(key.clone(), value.clone());
            next
        });
        self.pending_write.store(true, Ordering::SeqCst);
    }

    /// Flush local changes to disk.
    ///
    /// No persisted format exists yet, so the flush is observable only
    /// in the log. It must never fail or block the loop.
    // TODO: write the tables back out once a durable format is settled.
    fn save_to_file(&self) {
        tracing::info!(path = %self.path.display(), "Flushing pending config changes");
    }
}

/// One cycle per iteration: flush a pending local write, else compare
/// fingerprints and reload on change, else sleep out the interval.
/// Flush and reload cycles do not sleep; the loop only suspends when
/// nothing happened.
async fn poll_loop(
    shared: Arc<Shared>,
    initial: Fingerprint,
    interval: Duration,
    mut stop: StopReceiver,
) {
    let mut last = initial;

    loop {
        if stop.is_stopped() {
            break;
        }

        // A pending local write takes priority over a reload this cycle.
        if shared.pending_write.load(Ordering::SeqCst) {
            shared.save_to_file();
            shared.pending_write.store(false, Ordering::SeqCst);
            continue;
        }

        match Fingerprint::of_file(&shared.path).await {
            Fingerprint::Unavailable => {
                // Unreadable reads as "no change"; updating resumes
                // once the file is readable again.
                tracing::debug!(
                    path = %shared.path.display(),
                    "Config file unreadable, skipping cycle"
                );
            }
            current if current != last => match tokio::fs::read(&shared.path).await {
                Ok(bytes) => {
                    last = current;
                    let table = parser::parse(&String::from_utf8_lossy(&bytes));
                    tracing::info!(
                        path = %shared.path.display(),
                        entries = table.len(),
                        "Config file changed, reloaded"
                    );
                    shared.publish(table);
                    continue;
                }
                Err(e) => {
                    // The fingerprint is left as-is so the change is
                    // picked up on the next cycle.
                    tracing::warn!(
                        path = %shared.path.display(),
                        error = %e,
                        "Config file changed but could not be read"
                    );
                }
            },
            _ => {}
        }

        tokio::select! {
            _ = stop.stopped() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    tracing::debug!(path = %shared.path.display(), "Config poll loop stopped");
}
