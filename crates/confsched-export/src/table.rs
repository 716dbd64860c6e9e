//! Tables as rows of rendered cells.
//!
//! Every exported table goes through [`Frame`]: a header row plus rows of
//! cells already rendered to text. Timestamps render as
//! `YYYY-MM-DD HH:MM:SS±HH:MM`, dates as `YYYY-MM-DD`, and absent values as
//! empty cells.

use confsched_core::time::{format_date, format_timestamp};
use confsched_core::{Company, Event, Presenter, Schedule};

/// A record type that can be laid out as a table row.
pub trait Tabular {
    /// Column headers, in order.
    fn columns() -> &'static [&'static str];

    /// This record's cells, one per column.
    fn cells(&self) -> Vec<String>;
}

impl Tabular for Event {
    fn columns() -> &'static [&'static str] {
        &[
            "title",
            "trackName",
            "presenters",
            "company",
            "room",
            "since",
            "till",
            "date",
            "about",
            "link",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.track_name.clone(),
            self.presenters.clone(),
            self.company.clone(),
            self.room.clone(),
            self.since.as_ref().map(format_timestamp).unwrap_or_default(),
            self.till.as_ref().map(format_timestamp).unwrap_or_default(),
            self.date.as_ref().map(format_date).unwrap_or_default(),
            self.about.clone(),
            self.link.clone().unwrap_or_default(),
        ]
    }
}

impl Tabular for Presenter {
    fn columns() -> &'static [&'static str] {
        &["name", "tagline", "company", "socialLinks", "about"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.tagline.clone(),
            self.company.clone(),
            self.social_links.clone(),
            self.about.clone(),
        ]
    }
}

impl Tabular for Company {
    fn columns() -> &'static [&'static str] {
        &["name", "link", "socialLinks"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.link.clone(),
            self.social_links.clone(),
        ]
    }
}

/// A rendered table: column headers and rows of text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Frame {
    /// Creates a frame from headers and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Renders a slice of records.
    pub fn from_rows<T: Tabular>(records: &[T]) -> Self {
        Self {
            columns: T::columns().iter().map(|c| c.to_string()).collect(),
            rows: records.iter().map(T::cells).collect(),
        }
    }

    /// Prepends an index column with an empty header and zero-based row
    /// positions.
    pub fn with_index(mut self) -> Self {
        self.columns.insert(0, String::new());
        for (position, row) in self.rows.iter_mut().enumerate() {
            row.insert(0, position.to_string());
        }
        self
    }

    /// Column headers.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of each column: the longest cell or header, in characters,
    /// plus one.
    pub fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(index, header)| {
                let longest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0);
                longest.max(header.chars().count()) + 1
            })
            .collect()
    }
}

/// The three tables of a schedule as named frames, in the order
/// events, presenters, companies.
pub fn schedule_frames(schedule: &Schedule) -> Vec<(String, Frame)> {
    vec![
        ("events".to_string(), Frame::from_rows(schedule.events())),
        (
            "presenters".to_string(),
            Frame::from_rows(schedule.presenters()),
        ),
        (
            "companies".to_string(),
            Frame::from_rows(schedule.companies()),
        ),
    ]
}
