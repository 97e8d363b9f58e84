//! Error types for the resort core.
//!
//! [`ResortError`] covers the write path (unknown ids, out-of-domain
//! status strings) and dataset loading. The read path never fails: an
//! unknown id yields `None` and a dangling cross-reference is skipped.

use std::path::PathBuf;

use snowtooth_types::Collection;

/// Errors raised by the resort core.
#[derive(Debug, thiserror::Error)]
pub enum ResortError {
    /// No entity with the given id exists in the named collection.
    #[error("{collection} `{id}` not found")]
    NotFound {
        /// The collection that was searched.
        collection: Collection,
        /// The id that was not found.
        id: String,
    },

    /// A status string was not one of `OPEN`, `HOLD`, `CLOSED`.
    #[error("invalid status `{0}`: expected OPEN, HOLD, or CLOSED")]
    InvalidStatus(String),

    /// The initial dataset contains the same id twice in one collection.
    #[error("duplicate {collection} id `{id}` in dataset")]
    DuplicateId {
        /// The collection containing the duplicate.
        collection: Collection,
        /// The repeated id.
        id: String,
    },

    /// A dataset file could not be read.
    #[error("failed to read dataset file {}: {source}", path.display())]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A dataset file is not valid JSON for its collection.
    #[error("failed to parse dataset {}: {source}", path.display())]
    Json {
        /// The file (or inline source label) that failed to parse.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

impl ResortError {
    /// Build a [`ResortError::NotFound`] for the given collection and id.
    pub fn not_found(collection: Collection, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection,
            id: id.into(),
        }
    }
}
