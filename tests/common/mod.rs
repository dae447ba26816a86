//! Shared utilities for integration tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;

/// Create a temp dir holding a config file with the given lines.
pub fn config_file(lines: &[&str]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("app.conf");
    write_lines(&path, lines);
    (dir, path)
}

/// Overwrite the config file with a new set of lines.
///
/// Written to a sibling file and renamed into place so the poll loop
/// never reads a half-written revision.
pub fn write_lines(path: &Path, lines: &[&str]) {
    let mut content = lines.join("\n");
    content.push('\n');

    let staged = path.with_extension("tmp");
    std::fs::write(&staged, content).expect("write staged config");
    std::fs::rename(&staged, path).expect("replace config");
}

/// Poll until `predicate` holds or `deadline` elapses.
pub async fn wait_for(mut predicate: impl FnMut() -> bool, deadline: Duration) -> bool {
    let started = std::time::Instant::now();
    while started.elapsed() < deadline {
        if predicate() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    predicate()
}
