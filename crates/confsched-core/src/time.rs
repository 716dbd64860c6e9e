//! Timestamp parsing and rendering for schedule events.
//!
//! The upstream schedule carries `since`/`till` as RFC 3339 strings. They are
//! kept as [`Timestamp`] values with their original offset so that the
//! derived calendar date matches the wall clock of the venue rather than UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// A point in time with the offset it was published with.
pub type Timestamp = DateTime<FixedOffset>;

/// Format used when a timestamp is rendered into a table cell.
const CELL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// Format used when a date is rendered into a table cell.
const CELL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a schedule timestamp.
///
/// Accepts RFC 3339 (`2024-06-25T10:00:00Z`, `2024-06-25T10:00:00.000-07:00`).
/// A timestamp without an offset is taken to be UTC.
///
/// # Errors
///
/// Returns the chrono parse error when the value matches neither form.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, chrono::ParseError> {
    let raw = raw.trim();
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Ok(ts),
        Err(rfc_err) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc().fixed_offset())
            .map_err(|_| rfc_err),
    }
}

/// Returns the calendar date of a timestamp in its own offset.
pub fn event_date(ts: &Timestamp) -> NaiveDate {
    ts.date_naive()
}

/// Renders a timestamp for a table cell, e.g. `2024-06-25 10:00:00+00:00`.
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.format(CELL_TIMESTAMP_FORMAT).to_string()
}

/// Renders a date for a table cell, e.g. `2024-06-25`.
pub fn format_date(date: &NaiveDate) -> String {
    date.format(CELL_DATE_FORMAT).to_string()
}

/// Two-digit day of month, used in export file names.
pub fn day_of_month(date: &NaiveDate) -> String {
    date.format("%d").to_string()
}
