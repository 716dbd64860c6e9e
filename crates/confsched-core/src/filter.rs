//! Schedule filtering.
//!
//! Four independent membership predicates narrow a [`Schedule`]:
//!
//! | dimension | narrows                               |
//! |-----------|---------------------------------------|
//! | track     | events                                |
//! | date      | events                                |
//! | room      | events                                |
//! | company   | events, presenters and companies      |
//!
//! An empty selection disables its predicate. Predicates combine with AND and
//! never touch the source schedule.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::schedule::{Event, Schedule};
use crate::time::day_of_month;

/// Separator between values of one dimension in an export name.
const VALUE_SEPARATOR: &str = "-";

/// Separator between the base name and each active dimension.
const PART_SEPARATOR: &str = "_";

/// A set of selections over the four filter dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    /// Selected track names.
    pub tracks: BTreeSet<String>,
    /// Selected calendar dates.
    pub dates: BTreeSet<NaiveDate>,
    /// Selected rooms.
    pub rooms: BTreeSet<String>,
    /// Selected company names.
    pub companies: BTreeSet<String>,
}

impl ScheduleFilter {
    /// Creates a filter that selects everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to select tracks.
    pub fn with_tracks<I, S>(mut self, tracks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tracks.extend(tracks.into_iter().map(Into::into));
        self
    }

    /// Builder method to select dates.
    pub fn with_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.dates.extend(dates);
        self
    }

    /// Builder method to select rooms.
    pub fn with_rooms<I, S>(mut self, rooms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rooms.extend(rooms.into_iter().map(Into::into));
        self
    }

    /// Builder method to select companies.
    pub fn with_companies<I, S>(mut self, companies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.companies.extend(companies.into_iter().map(Into::into));
        self
    }

    /// Returns true if no dimension has a selection.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
            && self.dates.is_empty()
            && self.rooms.is_empty()
            && self.companies.is_empty()
    }

    /// Returns true if the event passes every active predicate.
    pub fn matches(&self, event: &Event) -> bool {
        track_matches(&self.tracks, event)
            && date_matches(&self.dates, event)
            && room_matches(&self.rooms, event)
            && company_matches(&self.companies, event)
    }

    /// Applies the filter and returns the narrowed schedule.
    pub fn apply(&self, schedule: &Schedule) -> Schedule {
        let events: Vec<Event> = schedule
            .events()
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect();

        let (presenters, companies) = if self.companies.is_empty() {
            (schedule.presenters().to_vec(), schedule.companies().to_vec())
        } else {
            narrow_people(schedule, &self.companies)
        };

        debug!(
            events = events.len(),
            presenters = presenters.len(),
            companies = companies.len(),
            "Applied schedule filter"
        );
        Schedule::new(events, presenters, companies)
    }

    /// Derives an export file base name from the active selections.
    ///
    /// For each active dimension, in the order track, date, room, company,
    /// appends `_` and the selected values joined with `-`. Dates are
    /// rendered as two-digit days of the month.
    pub fn export_name(&self, base: &str) -> String {
        let mut name = base.to_string();
        let mut push = |values: Vec<String>| {
            if !values.is_empty() {
                name.push_str(PART_SEPARATOR);
                name.push_str(&values.join(VALUE_SEPARATOR));
            }
        };
        push(self.tracks.iter().cloned().collect());
        push(self.dates.iter().map(day_of_month).collect());
        push(self.rooms.iter().cloned().collect());
        push(self.companies.iter().cloned().collect());
        name
    }
}

impl Schedule {
    /// Keeps events whose track is selected.
    pub fn filter_tracks(&self, tracks: &BTreeSet<String>) -> Schedule {
        self.narrow_events(|e| track_matches(tracks, e))
    }

    /// Keeps events whose date is selected.
    pub fn filter_dates(&self, dates: &BTreeSet<NaiveDate>) -> Schedule {
        self.narrow_events(|e| date_matches(dates, e))
    }

    /// Keeps events whose room is selected.
    pub fn filter_rooms(&self, rooms: &BTreeSet<String>) -> Schedule {
        self.narrow_events(|e| room_matches(rooms, e))
    }

    /// Keeps events, presenters and companies tied to a selected company.
    pub fn filter_companies(&self, companies: &BTreeSet<String>) -> Schedule {
        if companies.is_empty() {
            return self.clone();
        }
        let events = self
            .events()
            .iter()
            .filter(|e| company_matches(companies, e))
            .cloned()
            .collect();
        let (presenters, company_rows) = narrow_people(self, companies);
        Schedule::new(events, presenters, company_rows)
    }

    fn narrow_events(&self, keep: impl Fn(&Event) -> bool) -> Schedule {
        let events = self.events().iter().filter(|e| keep(e)).cloned().collect();
        Schedule::new(events, self.presenters().to_vec(), self.companies().to_vec())
    }
}

fn narrow_people(
    schedule: &Schedule,
    companies: &BTreeSet<String>,
) -> (Vec<crate::schedule::Presenter>, Vec<crate::schedule::Company>) {
    let presenters = schedule
        .presenters()
        .iter()
        .filter(|p| companies.contains(&p.company))
        .cloned()
        .collect();
    let company_rows = schedule
        .companies()
        .iter()
        .filter(|c| companies.contains(&c.name))
        .cloned()
        .collect();
    (presenters, company_rows)
}

fn track_matches(tracks: &BTreeSet<String>, event: &Event) -> bool {
    tracks.is_empty() || tracks.contains(&event.track_name)
}

fn date_matches(dates: &BTreeSet<NaiveDate>, event: &Event) -> bool {
    dates.is_empty() || event.date.is_some_and(|d| dates.contains(&d))
}

fn room_matches(rooms: &BTreeSet<String>, event: &Event) -> bool {
    rooms.is_empty() || rooms.contains(&event.room)
}

fn company_matches(companies: &BTreeSet<String>, event: &Event) -> bool {
    companies.is_empty() || event.has_company_in(companies)
}
