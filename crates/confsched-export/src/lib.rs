//! CSV and XLSX export of schedule tables.
//!
//! - [`to_csv`] / [`to_xlsx`] - one table, optionally with an index column
//! - [`to_xlsx_sheets`] - several named tables as sheets of one workbook
//! - [`sanitize_sheet_name`] - the sheet naming rule
//! - [`Tabular`] / [`Frame`] - how records become rows of text cells

pub mod delimited;
pub mod error;
pub mod table;
pub mod workbook;

use std::fmt;
use std::path::Path;

use tracing::info;

pub use delimited::{frame_to_csv, to_csv};
pub use error::{ExportError, ExportResult};
pub use table::{Frame, Tabular, schedule_frames};
pub use workbook::{DEFAULT_SHEET_NAME, sanitize_sheet_name, to_xlsx, to_xlsx_sheets};

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    /// Encodes one table in this format.
    ///
    /// # Errors
    ///
    /// Returns the encoder's error.
    pub fn encode<T: Tabular>(&self, table: &[T], include_index: bool) -> ExportResult<Vec<u8>> {
        match self {
            Self::Csv => to_csv(table, include_index).map(String::into_bytes),
            Self::Xlsx => to_xlsx(table, include_index),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Writes encoded bytes to `path`.
///
/// # Errors
///
/// Returns [`ExportError::Io`] naming the path on failure.
pub fn write_to_path(path: &Path, bytes: &[u8]) -> ExportResult<()> {
    std::fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = bytes.len(), "Wrote export");
    Ok(())
}
