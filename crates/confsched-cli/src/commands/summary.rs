//! Schedule summary command.

use confsched_core::time::format_date;
use confsched_core::{Schedule, ScheduleSummary};

use crate::error::ClientResult;

/// Print the headline numbers and distinct values of the schedule.
pub fn run(schedule: &Schedule, json: bool) -> ClientResult<()> {
    let summary = schedule.summary();
    if json {
        let text = serde_json::to_string_pretty(&summary).map_err(std::io::Error::from)?;
        println!("{}", text);
    } else {
        print!("{}", render(&summary));
    }
    Ok(())
}

/// Renders a summary as aligned `label: value` lines.
pub fn render(summary: &ScheduleSummary) -> String {
    let dates: Vec<String> = summary.dates.iter().map(format_date).collect();
    let lines = [
        ("events", summary.events.to_string()),
        ("presenters", summary.presenters.to_string()),
        ("tracks", summary.tracks.join(", ")),
        ("rooms", summary.rooms.join(", ")),
        ("dates", dates.join(", ")),
        ("companies", summary.companies.join(", ")),
    ];
    lines
        .iter()
        .map(|(label, value)| format!("{:<11} {}\n", format!("{label}:"), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn renders_aligned_lines() {
        let summary = ScheduleSummary {
            events: 2,
            presenters: 1,
            tracks: vec!["AI".to_string(), "Infra".to_string()],
            rooms: vec!["Main".to_string()],
            dates: vec![NaiveDate::from_ymd_opt(2024, 6, 25).unwrap()],
            companies: vec![],
        };
        assert_eq!(
            render(&summary),
            "events:     2\n\
             presenters: 1\n\
             tracks:     AI, Infra\n\
             rooms:      Main\n\
             dates:      2024-06-25\n\
             companies:  \n"
        );
    }
}
