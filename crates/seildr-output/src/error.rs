//! Error types for seildr-output.

use seildr_core::SeildrError;
use thiserror::Error;

/// Errors that can occur when reading scenario grids or writing results.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("scenario grid parse error: {0}")]
    Parse(String),

    #[error("cannot summarize an empty ensemble")]
    Empty,

    #[error(transparent)]
    Core(#[from] SeildrError),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
