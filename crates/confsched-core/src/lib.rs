//! Core types: schedule tables, links, filters, tracing

pub mod filter;
pub mod links;
pub mod schedule;
pub mod time;
pub mod tracing;

pub use filter::ScheduleFilter;
pub use links::{event_link, normalize_link, normalize_optional_link};
pub use schedule::{
    Company, Event, NO_NAMES, Presenter, Schedule, ScheduleSummary, UNKNOWN_ROOM, join_names,
};
pub use time::{Timestamp, parse_timestamp};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
