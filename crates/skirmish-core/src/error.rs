//! Error types for record loading and lookups.
//!
//! Combat itself never fails: a missing character only aborts the single
//! attack that needed it (see [`crate::combat::RoundEngine`]). Everything
//! that touches persisted data or resolves a user selection reports a
//! [`StoreError`].

use std::path::PathBuf;

use thiserror::Error;

use crate::entity::CharacterId;

/// Kind of record a lookup was performed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// A character record.
    Character,
    /// An item record.
    Item,
    /// A team record.
    Team,
    /// A stats record.
    Stats,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Character => write!(f, "character"),
            Self::Item => write!(f, "item"),
            Self::Team => write!(f, "team"),
            Self::Stats => write!(f, "stats"),
        }
    }
}

/// Errors raised while loading, saving or looking up records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record matched the given key.
    #[error("{kind} not found: {key}")]
    NotFound {
        /// Kind of record that was looked up
        kind: RecordKind,
        /// The id or name that missed
        key: String,
    },

    /// A selection index was outside the list bounds.
    #[error("invalid {kind} index {index} (have {len})")]
    InvalidIndex {
        /// Kind of record that was indexed
        kind: RecordKind,
        /// The requested index
        index: usize,
        /// Number of records available
        len: usize,
    },

    /// A record in a data file is missing a field or has the wrong shape.
    #[error("malformed record in {}: {source}", path.display())]
    MalformedRecord {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// A character weighs nothing, which would divide the defense term by zero.
    #[error("character {id} ({name}) has a weight of 0 kg")]
    InvalidWeight {
        /// Offending character id
        id: CharacterId,
        /// Offending character name
        name: String,
    },

    /// One or more data files do not exist.
    #[error("missing data files: {}", join_paths(paths))]
    MissingFiles {
        /// Files that were expected but not found
        paths: Vec<PathBuf>,
    },

    /// Reading or writing a data file failed.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// File that could not be accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Shorthand for a [`StoreError::NotFound`].
    pub fn not_found(kind: RecordKind, key: impl ToString) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result alias for store operations.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;
