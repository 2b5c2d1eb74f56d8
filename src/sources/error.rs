use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the domain reliability dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not readable as CSV (bad header, encoding).
    #[error("failed to read dataset {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("dataset {path} has no `Domain` column")]
    MissingDomainColumn { path: PathBuf },
}
