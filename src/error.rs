use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Fatal failures that abort a reconciliation run.
///
/// Per-row problems never surface here; they are reported through a
/// [`DiagnosticSink`](crate::diagnostics::DiagnosticSink) instead.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Raised when an input path does not exist.
    #[error("input file not found: {0}")]
    FileNotFound(PathBuf),

    /// Raised when a loader is pointed at a file it cannot interpret.
    #[error("unsupported format for {path}: {reason}")]
    UnsupportedFormat { path: PathBuf, reason: String },

    /// Raised when a required sheet, header row or column is absent.
    #[error("schema error in {path}: {message}")]
    Schema { path: PathBuf, message: String },

    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the catalog cannot be parsed or written as CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the spreadsheet reader.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl SyncError {
    pub(crate) fn schema(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        SyncError::Schema {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn unsupported(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SyncError::UnsupportedFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
