//! Golden tests for schedule extraction.
//!
//! The fixture is a trimmed copy of a real schedule page: two days, a
//! presenter who speaks twice with a changed tagline, a company shared by
//! two presenters, an event without presenters and one without a room.

use confsched_core::Schedule;
use confsched_core::time::format_timestamp;

use crate::extract_from_html;

const PAGE: &str = include_str!("testdata/schedule.html");
const BASE: &str = "https://conf.example/s/";

fn schedule() -> Schedule {
    extract_from_html(PAGE, BASE).unwrap()
}

fn render_events(schedule: &Schedule) -> String {
    schedule
        .events()
        .iter()
        .map(|e| {
            format!(
                "{} | {} | {} | {} | {} | {}",
                e.since.as_ref().map(format_timestamp).unwrap_or_default(),
                e.title,
                e.presenters,
                e.company,
                e.room,
                e.link.as_deref().unwrap_or("-"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn golden_events() {
    insta::assert_snapshot!(render_events(&schedule()), @r"
    2024-06-25 09:00:00-07:00 | Keynote: The State of AI Engineering | swyx, Ben Dunphy | Latent Space | Keynote Hall | https://conf.example/s/keynote-state-of-ai
    2024-06-25 11:00:00-07:00 | Building Agents with Open Models | Jane Doe | Acme | Room A | https://conf.example/s/agents-open-models
    2024-06-25 11:00:00-07:00 | Agents Workshop | Ben Dunphy | Latent Space | Room A | https://conf.example/s/agents-workshop
    2024-06-25 12:00:00-07:00 | Lunch | NA | NA | Unknown | -
    2024-06-26 10:00:00-07:00 | Evals in Production | Jane Doe, Sam Roe | Acme | Room B | https://conf.example/s/evals-in-production
    ");
}

#[test]
fn golden_presenters() {
    let rendered = schedule()
        .presenters()
        .iter()
        .map(|p| {
            format!(
                "{} | {} | {} | {} | {}",
                p.id, p.name, p.tagline, p.company, p.social_links
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(rendered, @r"
    1 | swyx | Editor | Latent Space | https://x.com/swyx
    2 | Ben Dunphy | Producer | Latent Space | https://x.com/bendunphy
    3 | Jane Doe | Founder & CTO | Acme | https://linkedin.com/in/janedoe
    4 | Sam Roe | Researcher |  | ask me on discord
    ");
}

#[test]
fn golden_companies() {
    let rendered = schedule()
        .companies()
        .iter()
        .map(|c| format!("{} | {} | {} | {}", c.id, c.name, c.social_links, c.link))
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(rendered, @r"
    10 | Latent Space | https://x.com/latentspacepod | https://latent.space
    11 | Acme |  | https://acme.ai
    ");
}

#[test]
fn golden_summary() {
    insta::assert_json_snapshot!(schedule().summary(), @r#"
    {
      "events": 5,
      "presenters": 4,
      "tracks": [
        "Agents",
        "Breaks",
        "Evals",
        "Keynotes"
      ],
      "rooms": [
        "Keynote Hall",
        "Room A",
        "Room B",
        "Unknown"
      ],
      "dates": [
        "2024-06-25",
        "2024-06-26"
      ],
      "companies": [
        "Acme",
        "Latent Space"
      ]
    }
    "#);
}

#[test]
fn company_filter_narrows_people() {
    let filtered = schedule().filter_companies(&["Acme".to_string()].into());
    let titles: Vec<_> = filtered.events().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["Building Agents with Open Models", "Evals in Production"]);
    assert_eq!(filtered.presenters().len(), 1);
    assert_eq!(filtered.companies().len(), 1);
}
