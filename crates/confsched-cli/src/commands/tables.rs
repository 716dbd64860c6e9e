//! Single-table export commands: events, presenters, companies.
//!
//! Without `--format` the table is printed to stdout as CSV. With it, a
//! file named after the active filters (`events_AI_25.xlsx`) is written to
//! the output directory and its path is printed.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use confsched_core::{Schedule, ScheduleFilter};
use confsched_export::{ExportFormat, Tabular, to_csv, write_to_path};

use crate::cli::OutputArgs;
use crate::config::ExportSettings;
use crate::error::ClientResult;

/// Where and how a table is exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// File format; `None` prints CSV to stdout.
    pub format: Option<ExportFormat>,
    /// Directory for files.
    pub output_dir: PathBuf,
    /// Include a row index column.
    pub include_index: bool,
}

impl Destination {
    /// Combines the command flags with the configured defaults.
    pub fn resolve(args: &OutputArgs, settings: &ExportSettings) -> Self {
        Self {
            format: args.format.map(ExportFormat::from),
            output_dir: args
                .output_dir
                .clone()
                .or_else(|| settings.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
            include_index: args.index || settings.include_index,
        }
    }

    /// The file an export named `name` is written to in `format`.
    pub fn file_path(&self, name: &str, format: ExportFormat) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", name, format.extension()))
    }
}

/// Export the filtered event table.
pub fn events(schedule: &Schedule, filter: &ScheduleFilter, dest: &Destination) -> ClientResult<()> {
    let filtered = filter.apply(schedule);
    export(filtered.events(), &filter.export_name("events"), dest)
}

/// Export the presenter table, narrowed to the filter's companies.
pub fn presenters(
    schedule: &Schedule,
    filter: &ScheduleFilter,
    dest: &Destination,
) -> ClientResult<()> {
    let filtered = filter.apply(schedule);
    export(filtered.presenters(), &filter.export_name("presenters"), dest)
}

/// Export the company table, narrowed to the filter's companies.
pub fn companies(
    schedule: &Schedule,
    filter: &ScheduleFilter,
    dest: &Destination,
) -> ClientResult<()> {
    let filtered = filter.apply(schedule);
    export(filtered.companies(), &filter.export_name("companies"), dest)
}

fn export<T: Tabular>(table: &[T], name: &str, dest: &Destination) -> ClientResult<()> {
    debug!(name, rows = table.len(), "Exporting table");
    match dest.format {
        None => {
            let csv = to_csv(table, dest.include_index)?;
            std::io::stdout().lock().write_all(csv.as_bytes())?;
        }
        Some(format) => {
            let path = write_file(table, name, format, dest)?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn write_file<T: Tabular>(
    table: &[T],
    name: &str,
    format: ExportFormat,
    dest: &Destination,
) -> ClientResult<PathBuf> {
    let bytes = format.encode(table, dest.include_index)?;
    let path = dest.file_path(name, format);
    write_to_path(Path::new(&path), &bytes)?;
    Ok(path)
}
