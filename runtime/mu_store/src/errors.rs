//! Error types for stores and variable nodes.
//!
//! Store failures (I/O, encoding, use after close) are fatal to the
//! operation that hit them and are never retried. `NodeError::Undefined` is
//! the only value-level condition and is raised solely by reads that demand
//! a value.

use std::io;
use std::path::{Path, PathBuf};

/// Result of a backing-store operation.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result of a variable-node operation.
pub type NodeResult<T> = Result<T, NodeError>;

/// Backing-store failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the journal file failed.
    #[error("i/o error on `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A journal record could not be serialized.
    #[error("cannot encode journal record: {0}")]
    Encode(#[from] bincode::Error),
    /// A single record exceeded the frame size limit.
    #[error("journal record of {size} bytes exceeds the frame limit")]
    RecordTooLarge { size: usize },
    /// An earlier journal write failed; the journal accepts nothing more.
    #[error("journal `{}` failed earlier and accepts no further writes", .path.display())]
    Poisoned { path: PathBuf },
    /// The store was closed and its views are no longer usable.
    #[error("store `{name}` is closed")]
    Closed { name: String },
    /// The variable name cannot address a backing map.
    #[error("invalid variable name `{name}`")]
    InvalidName { name: String },
}

impl StoreError {
    /// Wrap an I/O error with the path it happened on.
    #[cold]
    pub fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Variable-node failure.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    /// A value was demanded from a node with no direct value.
    #[error("undefined node: {reference}")]
    Undefined { reference: String },
    /// Writes may not target a path that contains the probe sentinel.
    #[error("cannot store at probe reference {reference}")]
    ProbeWrite { reference: String },
    /// A merge source and target overlap within the same variable.
    #[error("cannot merge {from} into overlapping {into}")]
    MergeOverlap { from: String, into: String },
    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
