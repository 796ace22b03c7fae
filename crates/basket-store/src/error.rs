#![deny(unsafe_code)]

use std::path::PathBuf;

use thiserror::Error;

/// Failures of a [`KeyValueStorage`](crate::KeyValueStorage) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Failures of [`ItemStore`](crate::ItemStore) operations surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("index {index} is out of bounds for a list of {len} items")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Why a stored payload could not be used on startup.
///
/// Always recovered by falling back to seed data; exposed for logging and
/// diagnostics.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("stored item list is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}
