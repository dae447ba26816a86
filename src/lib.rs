//! Self-reloading typed configuration store.
//!
//! A [`DynamicConfig`] keeps four typed key/value tables (booleans,
//! strings, integers, doubles) synchronized with a human-editable text
//! file. A background task fingerprints the file on a fixed cadence
//! and atomically swaps in a freshly parsed snapshot when the content
//! changes; readers never block and never observe a half-replaced
//! table set.
//!
//! ```no_run
//! use dynconfig::{DynamicConfig, WatchOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), dynconfig::ConfigError> {
//! let store = DynamicConfig::open(WatchOptions {
//!     file_path: "app.conf".into(),
//!     poll_interval_ms: 500,
//! })?;
//!
//! if store.get_boolean("verbose").unwrap_or(false) {
//!     println!("greeting: {:?}", store.get_string("greeting"));
//! }
//! # Ok(())
//! # }
//! ```

// Core subsystem
pub mod config;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ConfigError;
pub use config::ConfigTable;
pub use config::ConfigValue;
pub use config::DynamicConfig;
pub use config::WatchOptions;
pub use lifecycle::StopSignal;
