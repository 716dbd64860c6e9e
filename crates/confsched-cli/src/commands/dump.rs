//! Workbook dump of all three tables.

use std::path::Path;

use confsched_core::Schedule;
use confsched_export::{schedule_frames, to_xlsx_sheets, write_to_path};

use crate::error::ClientResult;

/// Write the events, presenters and companies sheets to `output`.
pub fn run(schedule: &Schedule, output: &Path, adjust_column_width: bool) -> ClientResult<()> {
    let bytes = to_xlsx_sheets(&schedule_frames(schedule), adjust_column_width)?;
    write_to_path(output, &bytes)?;
    println!(
        "Wrote {} events, {} presenters and {} companies to {}",
        schedule.num_events(),
        schedule.presenters().len(),
        schedule.companies().len(),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use confsched_core::Event;

    #[test]
    fn writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.xlsx");
        let schedule = Schedule::new(vec![Event::new("Talk 1", "AI")], vec![], vec![]);

        run(&schedule, &path, true).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("schedule.xlsx");
        assert!(run(&Schedule::default(), &path, false).is_err());
    }
}
