//! Comma-separated text export.

use crate::error::ExportResult;
use crate::table::{Frame, Tabular};

/// Encodes records as CSV: a header row, then one row per record.
///
/// With `include_index`, a leading column with an empty header holds each
/// row's zero-based position.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn to_csv<T: Tabular>(table: &[T], include_index: bool) -> ExportResult<String> {
    let frame = Frame::from_rows(table);
    let frame = if include_index {
        frame.with_index()
    } else {
        frame
    };
    frame_to_csv(&frame)
}

/// Encodes a rendered frame as CSV.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn frame_to_csv(frame: &Frame) -> ExportResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(frame.columns())?;
    for row in frame.rows() {
        writer.write_record(row)?;
    }

    let bytes = writer.into_inner().map_err(|e| {
        csv::Error::from(std::io::Error::new(e.error().kind(), e.error().to_string()))
    })?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use confsched_core::{Company, Event, Presenter, parse_timestamp};

    fn events() -> Vec<Event> {
        vec![
            Event::new("Talk 1", "AI")
                .with_times(
                    Some(parse_timestamp("2024-06-25T10:00:00Z").unwrap()),
                    Some(parse_timestamp("2024-06-25T10:30:00Z").unwrap()),
                )
                .with_presenters(&["Jane Doe"])
                .with_companies(&["Acme"])
                .with_link(Some("https://conf.example/s/talk-1".to_string())),
            Event::new("Panel, part 2", "AI")
                .with_room("Room A")
                .with_presenters(&["Jane Doe", "John Roe"])
                .with_about("Say \"hi\""),
        ]
    }

    #[test]
    fn events_csv() {
        let csv = to_csv(&events(), false).unwrap();
        insta::assert_snapshot!(csv.trim_end(), @r#"
        title,trackName,presenters,company,room,since,till,date,about,link
        Talk 1,AI,Jane Doe,Acme,Unknown,2024-06-25 10:00:00+00:00,2024-06-25 10:30:00+00:00,2024-06-25,,https://conf.example/s/talk-1
        "Panel, part 2",AI,"Jane Doe, John Roe",NA,Room A,,,,"Say ""hi""",
        "#);
    }

    #[test]
    fn presenters_csv_with_index() {
        let mut jane = Presenter::new("p1", "Jane Doe").with_company("Acme");
        jane.tagline = "CTO".to_string();
        jane.social_links = "https://x.com/jane".to_string();
        let presenters = vec![jane, Presenter::new("p2", "John Roe")];

        let csv = to_csv(&presenters, true).unwrap();
        insta::assert_snapshot!(csv.trim_end(), @r"
        ,name,tagline,company,socialLinks,about
        0,Jane Doe,CTO,Acme,https://x.com/jane,
        1,John Roe,,,,
        ");
    }

    #[test]
    fn empty_table_has_header_only() {
        let csv = to_csv::<Company>(&[], false).unwrap();
        assert_eq!(csv, "name,link,socialLinks\n");
    }

    #[test]
    fn multiline_about_is_quoted() {
        let event = Event::new("Talk", "AI").with_about("line one\nline two");
        let csv = to_csv(&[event], false).unwrap();
        assert!(csv.contains("\"line one\nline two\""));
    }
}
