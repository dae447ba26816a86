//! Configuration store subsystem.
//!
//! # Data Flow
//! ```text
//! config file (line-oriented text)
//!     → loader.rs (ensure file exists, initial read)
//!     → parser.rs (text → four typed tables)
//!     → ConfigTable (immutable snapshot)
//!     → published via ArcSwap to all readers
//!
//! Each poll cycle (watcher.rs):
//!     pending local write → flush, skip reload
//!     else fingerprint.rs hashes the file bytes
//!     → on change: re-read, re-parse
//!     → atomic swap of Arc<ConfigTable>
//!     → readers observe the new snapshot
//! ```
//!
//! # Design Decisions
//! - Snapshots are immutable once published; any change swaps the whole set
//! - Malformed lines are skipped silently; the format has no error channel
//! - An unreadable file means "no change this cycle", never a crash

pub mod fingerprint;
pub mod loader;
pub mod parser;
pub mod schema;
pub mod table;
pub mod watcher;

pub use loader::ConfigError;
pub use schema::WatchOptions;
pub use table::ConfigTable;
pub use table::ConfigValue;
pub use watcher::DynamicConfig;
