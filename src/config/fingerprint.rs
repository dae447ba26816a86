//! Content fingerprinting for change detection.

use std::path::Path;

use sha2::{Digest, Sha256};

/// Content hash of the watched file's raw bytes.
///
/// Used only to decide whether a reload is needed, never persisted and
/// never an integrity guarantee. An unreadable file yields
/// `Unavailable`, which the poll loop folds into "no change this
/// cycle" — dynamic updating pauses until the file is readable again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fingerprint {
    Digest([u8; 32]),
    Unavailable,
}

impl Fingerprint {
    /// Fingerprint bytes already in memory.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Fingerprint::Digest(hasher.finalize().into())
    }

    /// Fingerprint the file at `path`, reading it in full.
    pub async fn of_file(path: &Path) -> Self {
        match tokio::fs::read(path).await {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(_) => Fingerprint::Unavailable,
        }
    }
}
