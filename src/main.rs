//! dynconfig daemon.
//!
//! Watches a config file and keeps the typed store in sync until
//! interrupted. Useful for exercising the reload path against a real
//! editor: change the file, watch the reload land in the log.

use clap::Parser;

use dynconfig::config::schema::DEFAULT_POLL_INTERVAL_MS;
use dynconfig::observability::logging::init_logging;
use dynconfig::{DynamicConfig, WatchOptions};

#[derive(Debug, Parser)]
#[command(name = "dynconfig", about = "Self-reloading typed configuration store")]
struct Cli {
    /// Path to the watched config file (created if absent).
    #[arg(long, default_value = "dynamic.conf")]
    config: std::path::PathBuf,

    /// Reload cadence in milliseconds; negative disables polling.
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS, allow_negative_numbers = true)]
    poll_interval_ms: i64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging("dynconfig=debug");

    tracing::info!("dynconfig v0.1.0 starting");

    let store = DynamicConfig::open(WatchOptions {
        file_path: cli.config,
        poll_interval_ms: cli.poll_interval_ms,
    })?;

    tracing::info!(
        path = %store.path().display(),
        poll_interval_ms = cli.poll_interval_ms,
        "Configuration loaded"
    );

    tokio::signal::ctrl_c().await?;

    store.stop();
    tracing::info!("Shutdown complete");
    Ok(())
}
