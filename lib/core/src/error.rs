use std::path::PathBuf;
use thiserror::Error;

use crate::record::BookId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Unknown genre: {0}")]
    UnknownGenre(String),

    #[error("Unknown book id: {0}")]
    UnknownBookId(BookId),
}

/// Startup failures. Any of these aborts the process before it serves.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {path:?} at line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Missing column '{column}' in {path:?}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown genre '{genre}' in {path:?}")]
    UnknownGenreKey { path: PathBuf, genre: String },

    #[error("Duplicate id {id} in {path:?} at line {line}")]
    DuplicateId {
        path: PathBuf,
        line: usize,
        id: BookId,
    },

    /// A table handed to the store repeats an id.
    #[error("Duplicate id {id} in {table} table")]
    DuplicateRecord { table: &'static str, id: BookId },

    #[error(
        "Metadata and scores are not aligned: {} ids lack scores, {} ids lack metadata",
        .missing_scores.len(),
        .missing_metadata.len()
    )]
    KeyMismatch {
        missing_scores: Vec<BookId>,
        missing_metadata: Vec<BookId>,
    },
}
