//! Batch errors

use std::path::PathBuf;

/// Failure in the batch output sinks
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to append results to {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
