//! Error types for the epscan-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the epscan library.
///
/// A document whose EPS label cannot be found is not an error: extraction
/// reports that as an absent value. Errors here mean the input itself could
/// not be read or the reporting layer failed.
#[derive(Error, Debug)]
pub enum EpsError {
    /// Document loading or normalization error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Result file error.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning a document into normalized text.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension is not a supported document format.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Errors related to result and reference tables.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Underlying CSV reader/writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while flushing or opening a table.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required column is missing from the header row.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// A non-blank EPS cell could not be parsed as a decimal.
    #[error("invalid EPS value on row {row}: {value:?}")]
    InvalidValue { row: usize, value: String },
}

/// Result type for the epscan library.
pub type Result<T> = std::result::Result<T, EpsError>;
