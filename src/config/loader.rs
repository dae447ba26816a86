//! Construction-time file I/O.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::fingerprint::Fingerprint;
use crate::config::parser;
use crate::config::table::ConfigTable;

/// Error type for store construction.
///
/// This is the one fatal error class: without a readable file there is
/// nothing to watch. Every failure after construction is recovered
/// locally by the poll loop.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to create config file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Ensure the config file exists, creating missing parent directories
/// and an empty file as needed.
pub fn ensure_file(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Create {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    fs::File::create(path).map_err(|source| ConfigError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Read the file once and derive both the initial table set and the
/// initial fingerprint from the same bytes.
pub fn load_snapshot(path: &Path) -> Result<(ConfigTable, Fingerprint), ConfigError> {
    let bytes = fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let fingerprint = Fingerprint::from_bytes(&bytes);
    let table = parser::parse(&String::from_utf8_lossy(&bytes));

    Ok((table, fingerprint))
}
