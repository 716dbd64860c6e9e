//! Error types for table export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while encoding or writing tables.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The CSV writer failed.
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    /// The spreadsheet writer failed, including rejected sheet names.
    #[error("spreadsheet encoding failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// CSV output was not valid UTF-8.
    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Writing the encoded table to disk failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The table does not fit in one worksheet.
    #[error("table of {rows} rows and {columns} columns exceeds worksheet limits")]
    TooLarge { rows: usize, columns: usize },
}

/// A specialized Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
