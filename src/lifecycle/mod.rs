//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (watcher.rs):
//!     Ensure file → initial load → spawn poll loop
//!
//! Shutdown (shutdown.rs):
//!     stop() or store dropped → signal → loop exits after current cycle
//! ```
//!
//! # Design Decisions
//! - Stop is cooperative: in-flight reloads complete, no partial snapshot
//! - A dropped store counts as a stop, so tasks are never leaked

pub mod shutdown;

pub use shutdown::StopSignal;
