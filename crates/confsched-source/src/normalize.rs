//! Raw events to schedule tables.
//!
//! [`normalize_events`] walks the raw event list once, in input order, and
//! builds the three tables of a [`Schedule`] together:
//!
//! 1. Each presenter reference is upserted into a presenter registry keyed
//!    by its source identifier, with its company resolved to a name.
//! 2. Each company reference is upserted into a company registry the same
//!    way.
//! 3. The event row gets the de-duplicated presenter and company names of
//!    its references.
//!
//! Registries are ordered maps: a recurring identifier keeps the position of
//! its first occurrence and the record of its last one.
//!
//! Once all events are projected they are sorted by start time. The sort is
//! stable and events without a start time go last.

use confsched_core::{
    Company, Event, Presenter, Schedule, Timestamp, event_link, normalize_optional_link,
    parse_timestamp,
};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace, warn};

use crate::error::{ExtractError, ExtractResult};
use crate::raw_event::{RawCompany, RawEvent, RawPresenter};

/// Identity tables accumulated across events.
#[derive(Debug, Default)]
struct Registry {
    presenters: IndexMap<String, Presenter>,
    companies: IndexMap<String, Company>,
}

impl Registry {
    fn upsert_presenter(&mut self, presenter: Presenter) {
        let id = presenter.id.clone();
        if let Some(previous) = self.presenters.insert(id, presenter) {
            debug!(id = %previous.id, name = %previous.name, "Presenter record replaced");
        }
    }

    fn upsert_company(&mut self, company: Company) {
        let id = company.id.clone();
        if let Some(previous) = self.companies.insert(id, company) {
            debug!(id = %previous.id, name = %previous.name, "Company record replaced");
        }
    }
}

/// Names collected for one event.
#[derive(Debug, Default)]
struct EventNames {
    presenters: IndexSet<String>,
    companies: IndexSet<String>,
}

/// Builds the schedule tables from decoded raw events.
///
/// `event_base_url` is prefixed to each event slug to form the event link.
///
/// # Errors
///
/// Returns an `UnexpectedShape` error naming the event and field when a
/// start or end time is present but cannot be parsed.
pub fn normalize_events(raw_events: &[RawEvent], event_base_url: &str) -> ExtractResult<Schedule> {
    let mut registry = Registry::default();
    let mut events = Vec::with_capacity(raw_events.len());

    for (index, raw) in raw_events.iter().enumerate() {
        events.push(project_event(index, raw, event_base_url, &mut registry)?);
    }

    events.sort_by_key(|e| (e.since.is_none(), e.since));

    let Registry {
        presenters,
        companies,
    } = registry;
    debug!(
        events = events.len(),
        presenters = presenters.len(),
        companies = companies.len(),
        "Normalized schedule"
    );

    Ok(Schedule::new(
        events,
        presenters.into_values().collect(),
        companies.into_values().collect(),
    ))
}

fn project_event(
    index: usize,
    raw: &RawEvent,
    event_base_url: &str,
    registry: &mut Registry,
) -> ExtractResult<Event> {
    let mut names = EventNames::default();
    for presenter in &raw.presenters {
        resolve_presenter(index, presenter, &mut names, registry);
    }

    let since = parse_time(index, "since", raw.since.as_deref())?;
    let till = parse_time(index, "till", raw.till.as_deref())?;

    let presenters: Vec<_> = names.presenters.into_iter().collect();
    let companies: Vec<_> = names.companies.into_iter().collect();

    let event = Event::new(trimmed(raw.title.as_deref()), trimmed(raw.track_name.as_deref()))
        .with_room(trimmed(raw.room.as_deref()))
        .with_times(since, till)
        .with_presenters(&presenters)
        .with_companies(&companies)
        .with_about(raw.about.clone().unwrap_or_default())
        .with_link(event_link(event_base_url, raw.slug.as_deref().map(str::trim)));

    if event.ends_before_start() {
        warn!(index, title = %event.title, "Event ends before it starts");
    }
    trace!(index, title = %event.title, presenters = %event.presenters, "Projected event");
    Ok(event)
}

fn resolve_presenter(
    index: usize,
    raw: &RawPresenter,
    names: &mut EventNames,
    registry: &mut Registry,
) {
    let attributes = raw.attributes.clone().unwrap_or_default();
    let name = trimmed(attributes.name.as_deref());
    if name.is_empty() {
        warn!(index, id = %raw.id, "Presenter without a name");
    } else {
        names.presenters.insert(name.clone());
    }

    let company = attributes
        .company
        .and_then(|reference| reference.data)
        .map(|company| resolve_company(&company, registry))
        .unwrap_or_default();
    if !company.is_empty() {
        names.companies.insert(company.clone());
    }

    let mut presenter = Presenter::new(raw.id.to_string(), name).with_company(company);
    presenter.tagline = attributes.tagline.unwrap_or_default();
    presenter.about = attributes.about.unwrap_or_default();
    presenter.social_links = normalize_optional_link(attributes.social_links.as_deref());
    registry.upsert_presenter(presenter);
}

/// Upserts a company and returns its trimmed name, which may be empty.
fn resolve_company(raw: &RawCompany, registry: &mut Registry) -> String {
    let attributes = raw.attributes.clone().unwrap_or_default();
    let name = trimmed(attributes.name.as_deref());
    if name.is_empty() {
        debug!(id = %raw.id, "Company without a name");
    }

    let mut company = Company::new(raw.id.to_string(), name.clone());
    company.link = normalize_optional_link(attributes.link.as_deref());
    company.social_links = normalize_optional_link(attributes.social_links.as_deref());
    registry.upsert_company(company);
    name
}

fn parse_time(index: usize, field: &str, raw: Option<&str>) -> ExtractResult<Option<Timestamp>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_timestamp(value).map(Some).map_err(|e| {
            ExtractError::unexpected_shape(format!("invalid timestamp {value:?}: {e}"))
                .at_path(format!("events[{index}].{field}"))
                .with_source(e)
        }),
    }
}

fn trimmed(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractErrorCode;
    use confsched_core::{NO_NAMES, UNKNOWN_ROOM};
    use serde_json::json;

    const BASE: &str = "https://conf.example/schedule/";

    fn talk(title: &str, since: &str) -> RawEvent {
        RawEvent::new(title, "AI").with_times(since, "2024-06-25T23:00:00Z")
    }

    mod example {
        use super::*;

        #[test]
        fn single_event_tables() {
            let raw: RawEvent = serde_json::from_value(json!({
                "title": "Talk 1",
                "trackName": "AI",
                "since": "2024-06-25T10:00:00Z",
                "till": "2024-06-25T10:30:00Z",
                "room": null,
                "slug": "talk-1",
                "presenters": [{
                    "id": "p1",
                    "attributes": {
                        "name": "Jane Doe",
                        "company": {"data": {"id": "c1", "attributes": {"name": "Acme"}}}
                    }
                }]
            }))
            .unwrap();

            let schedule = normalize_events(&[raw], BASE).unwrap();

            let event = &schedule.events()[0];
            assert_eq!(event.room, UNKNOWN_ROOM);
            assert_eq!(event.presenters, "Jane Doe");
            assert_eq!(event.company, "Acme");
            assert_eq!(event.link.as_deref(), Some("https://conf.example/schedule/talk-1"));
            assert_eq!(
                event.date,
                chrono::NaiveDate::from_ymd_opt(2024, 6, 25)
            );

            assert_eq!(schedule.presenters().len(), 1);
            assert_eq!(schedule.presenters()[0].id, "p1");
            assert_eq!(schedule.presenters()[0].company, "Acme");
            assert_eq!(schedule.companies().len(), 1);
            assert_eq!(schedule.companies()[0].id, "c1");
        }

        #[test]
        fn empty_input() {
            let schedule = normalize_events(&[], BASE).unwrap();
            assert_eq!(schedule, Schedule::default());
        }
    }

    mod identities {
        use super::*;

        #[test]
        fn last_presenter_record_wins() {
            let events = vec![
                talk("Talk 1", "2024-06-25T10:00:00Z")
                    .with_presenter(RawPresenter::new("p1", "Jane Doe").with_tagline("CTO")),
                talk("Talk 2", "2024-06-25T11:00:00Z")
                    .with_presenter(RawPresenter::new("p2", "John Roe"))
                    .with_presenter(RawPresenter::new("p1", "Jane Doe").with_tagline("CEO")),
            ];

            let schedule = normalize_events(&events, BASE).unwrap();
            let presenters = schedule.presenters();
            assert_eq!(presenters.len(), 2);
            assert_eq!(presenters[0].id, "p1");
            assert_eq!(presenters[0].tagline, "CEO");
            assert_eq!(presenters[1].id, "p2");
        }

        #[test]
        fn last_company_record_wins() {
            let events = vec![
                talk("Talk 1", "2024-06-25T10:00:00Z").with_presenter(
                    RawPresenter::new("p1", "Jane Doe")
                        .with_company(RawCompany::new("c1", "Acme").with_links("acme.com", "")),
                ),
                talk("Talk 2", "2024-06-25T11:00:00Z").with_presenter(
                    RawPresenter::new("p2", "John Roe").with_company(
                        RawCompany::new("c1", "Acme").with_links("https://acme.io", "x.com/acme"),
                    ),
                ),
            ];

            let schedule = normalize_events(&events, BASE).unwrap();
            let companies = schedule.companies();
            assert_eq!(companies.len(), 1);
            assert_eq!(companies[0].link, "https://acme.io");
            assert_eq!(companies[0].social_links, "https://x.com/acme");
        }

        #[test]
        fn names_are_unique_per_event() {
            let acme = RawCompany::new("c1", "Acme");
            let event = talk("Panel", "2024-06-25T10:00:00Z")
                .with_presenter(RawPresenter::new("p1", "Jane Doe").with_company(acme.clone()))
                .with_presenter(RawPresenter::new("p1", " Jane Doe ").with_company(acme.clone()))
                .with_presenter(RawPresenter::new("p2", "John Roe").with_company(acme));

            let schedule = normalize_events(&[event], BASE).unwrap();
            let event = &schedule.events()[0];
            assert_eq!(event.presenters, "Jane Doe, John Roe");
            assert_eq!(event.company, "Acme");
            assert_eq!(event.company_names(), ["Acme".to_string()]);
        }

        #[test]
        fn integer_ids_become_text() {
            let raw: RawEvent = serde_json::from_value(json!({
                "title": "Talk",
                "presenters": [{"id": 12, "attributes": {"name": "Jane Doe",
                    "company": {"data": {"id": 3, "attributes": {"name": "Acme"}}}}}]
            }))
            .unwrap();
            let schedule = normalize_events(&[raw], BASE).unwrap();
            assert_eq!(schedule.presenters()[0].id, "12");
            assert_eq!(schedule.companies()[0].id, "3");
        }

        #[test]
        fn presenter_without_company() {
            let raw: RawEvent = serde_json::from_value(json!({
                "title": "Talk",
                "presenters": [{"id": "p1", "attributes": {"name": "Jane Doe",
                    "company": {"data": null}}}]
            }))
            .unwrap();
            let schedule = normalize_events(&[raw], BASE).unwrap();
            assert_eq!(schedule.presenters()[0].company, "");
            assert!(schedule.companies().is_empty());
            assert_eq!(schedule.events()[0].company, NO_NAMES);
        }

        #[test]
        fn blank_names_keep_their_identities() {
            let events = vec![
                talk("Talk 1", "2024-06-25T10:00:00Z").with_presenter(
                    RawPresenter::new("p1", "Jane Doe")
                        .with_tagline("CTO")
                        .with_company(RawCompany::new("c1", "Acme")),
                ),
                talk("Talk 2", "2024-06-25T11:00:00Z")
                    .with_presenter(
                        RawPresenter::new("p1", "  ")
                            .with_tagline("CEO")
                            .with_company(RawCompany::new("c2", "Globex")),
                    )
                    .with_presenter(
                        RawPresenter::new("p9", "John Roe")
                            .with_company(RawCompany::new("c3", " ")),
                    ),
            ];

            let schedule = normalize_events(&events, BASE).unwrap();

            let presenters: Vec<_> = schedule
                .presenters()
                .iter()
                .map(|p| (p.id.as_str(), p.name.as_str(), p.tagline.as_str(), p.company.as_str()))
                .collect();
            assert_eq!(
                presenters,
                [("p1", "", "CEO", "Globex"), ("p9", "John Roe", "", "")]
            );

            let companies: Vec<_> = schedule
                .companies()
                .iter()
                .map(|c| (c.id.as_str(), c.name.as_str()))
                .collect();
            assert_eq!(companies, [("c1", "Acme"), ("c2", "Globex"), ("c3", "")]);

            let second = &schedule.events()[1];
            assert_eq!(second.presenters, "John Roe");
            assert_eq!(second.company, "Globex");
        }
    }

    mod fill_rules {
        use super::*;

        #[test]
        fn missing_fields_get_placeholders() {
            let raw: RawEvent = serde_json::from_value(json!({"title": "Break"})).unwrap();
            let schedule = normalize_events(&[raw], BASE).unwrap();
            let event = &schedule.events()[0];
            assert_eq!(event.room, UNKNOWN_ROOM);
            assert_eq!(event.presenters, NO_NAMES);
            assert_eq!(event.company, NO_NAMES);
            assert_eq!(event.about, "");
            assert_eq!(event.track_name, "");
            assert!(event.link.is_none());
            assert!(event.since.is_none());
            assert!(event.date.is_none());
        }

        #[test]
        fn presenter_fields_default_to_empty() {
            let event = talk("Talk", "2024-06-25T10:00:00Z")
                .with_presenter(RawPresenter::new("p1", "Jane Doe"));
            let schedule = normalize_events(&[event], BASE).unwrap();
            let presenter = &schedule.presenters()[0];
            assert_eq!(presenter.tagline, "");
            assert_eq!(presenter.about, "");
            assert_eq!(presenter.social_links, "");
            assert_eq!(presenter.company, "");
        }

        #[test]
        fn social_links_are_normalized() {
            let event = talk("Talk", "2024-06-25T10:00:00Z").with_presenter(
                RawPresenter::new("p1", "Jane Doe").with_social_links("x.com/jane"),
            );
            let schedule = normalize_events(&[event], BASE).unwrap();
            assert_eq!(schedule.presenters()[0].social_links, "https://x.com/jane");
        }

        #[test]
        fn blank_slug_has_no_link() {
            let event = talk("Talk", "2024-06-25T10:00:00Z").with_slug("  ");
            let schedule = normalize_events(&[event], BASE).unwrap();
            assert!(schedule.events()[0].link.is_none());
        }
    }

    mod ordering {
        use super::*;

        #[test]
        fn sorted_by_start_time() {
            let events = vec![
                talk("Late", "2024-06-25T15:00:00Z"),
                talk("Early", "2024-06-25T09:00:00Z"),
            ];
            let schedule = normalize_events(&events, BASE).unwrap();
            let titles: Vec<_> = schedule.events().iter().map(|e| e.title.as_str()).collect();
            assert_eq!(titles, ["Early", "Late"]);
        }

        #[test]
        fn ties_keep_input_order() {
            let events = vec![
                talk("B", "2024-06-25T10:00:00Z"),
                talk("A", "2024-06-25T10:00:00Z"),
                talk("C", "2024-06-25T09:00:00Z"),
            ];
            let schedule = normalize_events(&events, BASE).unwrap();
            let titles: Vec<_> = schedule.events().iter().map(|e| e.title.as_str()).collect();
            assert_eq!(titles, ["C", "B", "A"]);
        }

        #[test]
        fn undated_events_go_last() {
            let events = vec![
                RawEvent::new("Undated", "AI"),
                talk("Dated", "2024-06-25T10:00:00Z"),
            ];
            let schedule = normalize_events(&events, BASE).unwrap();
            assert_eq!(schedule.events()[0].title, "Dated");
            assert_eq!(schedule.events()[1].title, "Undated");
        }

        #[test]
        fn offsets_compare_as_instants() {
            let events = vec![
                talk("UTC", "2024-06-25T10:00:00Z"),
                talk("Pacific", "2024-06-25T02:30:00-07:00"),
            ];
            let schedule = normalize_events(&events, BASE).unwrap();
            assert_eq!(schedule.events()[0].title, "Pacific");
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn invalid_timestamp_names_field() {
            let events = vec![
                talk("Fine", "2024-06-25T10:00:00Z"),
                RawEvent::new("Broken", "AI").with_times("tomorrow", "later"),
            ];
            let err = normalize_events(&events, BASE).unwrap_err();
            assert_eq!(err.code(), ExtractErrorCode::UnexpectedShape);
            assert_eq!(err.path(), Some("events[1].since"));
        }

        #[test]
        fn ends_before_start_is_kept() {
            let event = RawEvent::new("Backwards", "AI")
                .with_times("2024-06-25T11:00:00Z", "2024-06-25T10:00:00Z");
            let schedule = normalize_events(&[event], BASE).unwrap();
            assert!(schedule.events()[0].ends_before_start());
        }
    }
}
