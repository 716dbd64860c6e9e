//! Schedule tables.
//!
//! A [`Schedule`] is one snapshot of a conference programme, held as three
//! related tables:
//! - [`Event`]: one row per session, with presenters and companies rendered
//!   as display strings
//! - [`Presenter`]: one row per distinct presenter identifier
//! - [`Company`]: one row per distinct company identifier
//!
//! The tables are built together by the normalization pipeline and are not
//! mutated afterwards. Filtering (see [`crate::filter`]) produces new
//! schedules.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::time::{Timestamp, event_date};

/// Room shown for events the source did not assign a room to.
pub const UNKNOWN_ROOM: &str = "Unknown";

/// Display string for an event without presenters or companies.
pub const NO_NAMES: &str = "NA";

/// Separator between names in a display string.
const NAME_SEPARATOR: &str = ", ";

/// Joins de-duplicated names into a display string.
///
/// An empty list yields [`NO_NAMES`].
pub fn join_names<S: AsRef<str>>(names: &[S]) -> String {
    let joined = names
        .iter()
        .map(AsRef::as_ref)
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(NAME_SEPARATOR);
    if joined.is_empty() {
        NO_NAMES.to_string()
    } else {
        joined
    }
}

/// One scheduled conference session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Session title.
    pub title: String,
    /// The track this session belongs to.
    pub track_name: String,
    /// Presenter names, joined with `", "`, or `"NA"`.
    pub presenters: String,
    /// Company names, joined with `", "`, or `"NA"`.
    pub company: String,
    /// Room, or `"Unknown"`.
    pub room: String,
    /// Start time.
    pub since: Option<Timestamp>,
    /// End time.
    pub till: Option<Timestamp>,
    /// Calendar date of the start time.
    pub date: Option<NaiveDate>,
    /// Session description; empty when the source has none.
    pub about: String,
    /// Deep link to the session page on the source site.
    pub link: Option<String>,
    /// The companies behind [`Event::company`], used for filtering.
    #[serde(skip)]
    company_names: Vec<String>,
}

impl Event {
    /// Creates an event with every optional column at its fill value.
    pub fn new(title: impl Into<String>, track_name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            track_name: track_name.into(),
            presenters: NO_NAMES.to_string(),
            company: NO_NAMES.to_string(),
            room: UNKNOWN_ROOM.to_string(),
            since: None,
            till: None,
            date: None,
            about: String::new(),
            link: None,
            company_names: Vec::new(),
        }
    }

    /// Builder method to set the room. Blank rooms become `"Unknown"`.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        let room = room.into();
        self.room = if room.trim().is_empty() {
            UNKNOWN_ROOM.to_string()
        } else {
            room
        };
        self
    }

    /// Builder method to set start and end; the date follows the start.
    pub fn with_times(mut self, since: Option<Timestamp>, till: Option<Timestamp>) -> Self {
        self.date = since.as_ref().map(event_date);
        self.since = since;
        self.till = till;
        self
    }

    /// Builder method to set the presenter names.
    pub fn with_presenters<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.presenters = join_names(names);
        self
    }

    /// Builder method to set the company names.
    pub fn with_companies<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.company = join_names(names);
        self.company_names = names
            .iter()
            .map(|n| n.as_ref().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        self
    }

    /// Builder method to set the description.
    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.about = about.into();
        self
    }

    /// Builder method to set the deep link.
    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link;
        self
    }

    /// The companies of this event's presenters, de-duplicated.
    pub fn company_names(&self) -> &[String] {
        &self.company_names
    }

    /// Returns true if any of this event's companies is in `selected`.
    pub fn has_company_in(&self, selected: &BTreeSet<String>) -> bool {
        self.company_names.iter().any(|c| selected.contains(c))
    }

    /// Returns true if the end time precedes the start time.
    pub fn ends_before_start(&self) -> bool {
        matches!((self.since, self.till), (Some(since), Some(till)) if till < since)
    }
}

/// One person speaking at one or more events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Presenter {
    /// Source identifier.
    pub id: String,
    /// Display name, trimmed.
    pub name: String,
    /// Short tagline, usually a job title.
    pub tagline: String,
    /// Name of the presenter's company.
    pub company: String,
    /// Normalized social link.
    pub social_links: String,
    /// Biography.
    pub about: String,
}

impl Presenter {
    /// Creates a presenter with empty optional fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tagline: String::new(),
            company: String::new(),
            social_links: String::new(),
            about: String::new(),
        }
    }

    /// Builder method to set the company name.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }
}

/// One organization affiliated with one or more presenters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Source identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Normalized website link.
    pub link: String,
    /// Normalized social link.
    pub social_links: String,
}

impl Company {
    /// Creates a company with empty links.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            link: String::new(),
            social_links: String::new(),
        }
    }
}

/// Headline numbers and distinct values of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleSummary {
    pub events: usize,
    pub presenters: usize,
    pub tracks: Vec<String>,
    pub rooms: Vec<String>,
    pub dates: Vec<NaiveDate>,
    pub companies: Vec<String>,
}

/// The three tables of one schedule snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schedule {
    events: Vec<Event>,
    presenters: Vec<Presenter>,
    companies: Vec<Company>,
}

impl Schedule {
    /// Creates a schedule from already normalized tables.
    pub fn new(events: Vec<Event>, presenters: Vec<Presenter>, companies: Vec<Company>) -> Self {
        Self {
            events,
            presenters,
            companies,
        }
    }

    /// The event table, sorted by start time.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The presenter table.
    pub fn presenters(&self) -> &[Presenter] {
        &self.presenters
    }

    /// The company table.
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// Number of event rows.
    pub fn num_events(&self) -> usize {
        self.events.len()
    }

    /// Number of distinct presenter names.
    pub fn num_presenters(&self) -> usize {
        self.presenters
            .iter()
            .map(|p| p.name.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Sorted distinct track names.
    pub fn tracks(&self) -> Vec<String> {
        distinct(self.events.iter().map(|e| e.track_name.clone()))
    }

    /// Sorted distinct rooms.
    pub fn rooms(&self) -> Vec<String> {
        distinct(self.events.iter().map(|e| e.room.clone()))
    }

    /// Sorted distinct event dates.
    pub fn dates(&self) -> Vec<NaiveDate> {
        distinct(self.events.iter().filter_map(|e| e.date))
    }

    /// Sorted distinct company names.
    pub fn company_names(&self) -> Vec<String> {
        distinct(self.companies.iter().map(|c| c.name.clone()))
    }

    /// Collects the headline numbers of this schedule.
    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary {
            events: self.num_events(),
            presenters: self.num_presenters(),
            tracks: self.tracks(),
            rooms: self.rooms(),
            dates: self.dates(),
            companies: self.company_names(),
        }
    }
}

fn distinct<T: Ord>(values: impl Iterator<Item = T>) -> Vec<T> {
    values.collect::<BTreeSet<_>>().into_iter().collect()
}
