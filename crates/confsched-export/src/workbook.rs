//! XLSX export.
//!
//! Cells are written as text; header cells are bold. Sheet names are
//! cleaned with [`sanitize_sheet_name`] before they reach the workbook,
//! which still rejects names it cannot store (for example ones containing
//! `[` or `]`).

use std::sync::LazyLock;

use regex::Regex;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};
use tracing::debug;

use crate::error::{ExportError, ExportResult};
use crate::table::{Frame, Tabular};

/// Sheet name used for single-table workbooks.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Longest sheet name a workbook accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Worksheet row limit, header included.
const MAX_ROWS: usize = 1_048_576;

/// Worksheet column limit.
const MAX_COLUMNS: usize = 16_384;

static FORBIDDEN_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/:*?"<>|]"#).expect("Invalid sheet name regex"));

static QUOTE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]"#).expect("Invalid quote regex"));

/// Cleans a table name for use as a sheet name.
///
/// Each of `/ : * ? " < > |` becomes `_`, quotes are removed and whitespace
/// is trimmed. A name with nothing but those characters becomes
/// `Sheet{index}`; a longer name is cut to 31 characters.
///
/// ```
/// use confsched_export::sanitize_sheet_name;
///
/// assert_eq!(sanitize_sheet_name("A/B:C", 2), "A_B_C");
/// assert_eq!(sanitize_sheet_name("/:*", 2), "Sheet2");
/// ```
pub fn sanitize_sheet_name(name: &str, index: usize) -> String {
    let stripped = FORBIDDEN_CHARS.replace_all(name, "");
    if QUOTE_CHARS.replace_all(&stripped, "").trim().is_empty() {
        return format!("Sheet{index}");
    }

    let replaced = FORBIDDEN_CHARS.replace_all(name, "_");
    let cleaned = QUOTE_CHARS.replace_all(&replaced, "");
    cleaned.trim().chars().take(MAX_SHEET_NAME_LEN).collect()
}

/// Encodes records as a single-sheet workbook named `Sheet1`.
///
/// # Errors
///
/// Returns an error if the table exceeds worksheet limits or the workbook
/// cannot be written.
pub fn to_xlsx<T: Tabular>(table: &[T], include_index: bool) -> ExportResult<Vec<u8>> {
    let frame = Frame::from_rows(table);
    let frame = if include_index {
        frame.with_index()
    } else {
        frame
    };

    let mut workbook = Workbook::new();
    write_sheet(&mut workbook, DEFAULT_SHEET_NAME, &frame, false)?;
    Ok(workbook.save_to_buffer()?)
}

/// Encodes named frames as one workbook, one sheet per frame, in order.
///
/// Sheet names pass through [`sanitize_sheet_name`] with the frame's
/// position as index. With `adjust_column_width`, each column is sized to
/// its longest cell or header plus one.
///
/// # Errors
///
/// Returns an error if a table exceeds worksheet limits, a sheet name is
/// rejected (including duplicates) or the workbook cannot be written.
pub fn to_xlsx_sheets(
    sheets: &[(String, Frame)],
    adjust_column_width: bool,
) -> ExportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    for (index, (name, frame)) in sheets.iter().enumerate() {
        let sheet_name = sanitize_sheet_name(name, index);
        write_sheet(&mut workbook, &sheet_name, frame, adjust_column_width)?;
    }
    Ok(workbook.save_to_buffer()?)
}

fn write_sheet(
    workbook: &mut Workbook,
    name: &str,
    frame: &Frame,
    adjust_column_width: bool,
) -> ExportResult<()> {
    check_limits(frame)?;

    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(name)?;

    for (col, title) in frame.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col as ColNum, title, &header)?;
    }
    for (row, cells) in frame.rows().iter().enumerate() {
        for (col, cell) in cells.iter().enumerate().filter(|(_, c)| !c.is_empty()) {
            worksheet.write_string((row + 1) as RowNum, col as ColNum, cell)?;
        }
    }

    if adjust_column_width {
        for (col, width) in frame.column_widths().into_iter().enumerate() {
            worksheet.set_column_width(col as ColNum, width as f64)?;
        }
    }

    debug!(sheet = name, rows = frame.len(), "Wrote worksheet");
    Ok(())
}

// Casts to RowNum/ColNum in write_sheet rely on this check.
fn check_limits(frame: &Frame) -> ExportResult<()> {
    let rows = frame.len() + 1;
    let columns = frame.columns().len();
    if rows > MAX_ROWS || columns > MAX_COLUMNS {
        return Err(ExportError::TooLarge {
            rows: frame.len(),
            columns,
        });
    }
    Ok(())
}
