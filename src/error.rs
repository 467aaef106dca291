use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no valid records in {0:?}")]
    NoValidRecords(PathBuf),

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("requested {requested} records but the dataset only holds {available}")]
    InsufficientRecords { requested: usize, available: usize },

    #[error("sort order violation at record {index}: {reason}")]
    Verification { index: usize, reason: String },
}
