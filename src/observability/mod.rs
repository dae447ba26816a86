//! Observability subsystem.
//!
//! Store activity is reported through `tracing` events: reloads,
//! flushes, skipped cycles. Library code only emits events; the binary
//! installs an env-filtered fmt subscriber via `logging.rs`.

pub mod logging;
