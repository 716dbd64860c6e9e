//! Schedule extraction.
//!
//! This crate turns the conference schedule page into a
//! [`Schedule`](confsched_core::Schedule):
//!
//! - [`PageSource`] - Where the page comes from (HTTP, a saved file)
//! - [`find_data_block`] - Locates the embedded `__NEXT_DATA__` JSON
//! - [`resolve_events`] - Walks the payload down to the raw event list
//! - [`normalize_events`] - Builds the event, presenter and company tables
//! - [`ExtractError`] - Error types for extraction
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │  Schedule page  │    │   Saved file    │
//! └────────┬────────┘    └────────┬────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌─────────────────┐    ┌─────────────────┐
//! │   HttpSource    │    │   FileSource    │
//! └────────┬────────┘    └────────┬────────┘
//!          │      PageSource      │
//!          └──────────┬───────────┘
//!                     ▼ find_data_block()
//!              ┌─────────────┐
//!              │ JSON payload│
//!              └──────┬──────┘
//!                     ▼ resolve_events()
//!              ┌─────────────┐
//!              │  RawEvent   │
//!              └──────┬──────┘
//!                     ▼ normalize_events()
//!              ┌─────────────┐
//!              │  Schedule   │
//!              └─────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use confsched_source::{FileSource, load_schedule};
//!
//! async fn offline() -> ExtractResult<Schedule> {
//!     load_schedule(&FileSource::new("schedule.html"), DEFAULT_EVENT_BASE_URL).await
//! }
//! ```

pub mod config;
pub mod error;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod normalize;
pub mod page;
pub mod raw_event;
pub mod source;

use confsched_core::Schedule;
use tracing::info;

pub use config::{DEFAULT_EVENT_BASE_URL, DEFAULT_SCHEDULE_URL, SourceConfig};
pub use error::{ExtractError, ExtractErrorCode, ExtractResult};
#[cfg(feature = "fetch")]
pub use fetch::HttpSource;
pub use normalize::normalize_events;
pub use page::{find_data_block, parse_payload, resolve_events};
pub use raw_event::{RawCompany, RawEvent, RawId, RawPresenter};
pub use source::{BoxFuture, FileSource, PageContent, PageSource, StaticSource};

/// Extracts the schedule from a full HTML page.
///
/// # Errors
///
/// Returns `BlockNotFound` if the page has no data block, and
/// `UnexpectedShape` if the block does not hold a usable event list.
pub fn extract_from_html(html: &str, event_base_url: &str) -> ExtractResult<Schedule> {
    let block = find_data_block(html)?;
    extract_from_json(&block, event_base_url)
}

/// Extracts the schedule from the data block's JSON.
///
/// # Errors
///
/// Returns `UnexpectedShape` if the JSON does not hold a usable event list.
pub fn extract_from_json(json: &str, event_base_url: &str) -> ExtractResult<Schedule> {
    let payload = parse_payload(json)?;
    let raw_events = resolve_events(payload)?;
    normalize_events(&raw_events, event_base_url)
}

/// Loads a page from `source` and extracts the schedule from it.
///
/// # Errors
///
/// Propagates the source's error, or any extraction error.
pub async fn load_schedule(
    source: &dyn PageSource,
    event_base_url: &str,
) -> ExtractResult<Schedule> {
    let content = source.load().await?;
    info!(source = source.name(), kind = content.kind(), "Extracting schedule");
    let schedule = match content {
        PageContent::Html(html) => extract_from_html(&html, event_base_url)?,
        PageContent::Json(json) => extract_from_json(&json, event_base_url)?,
    };
    info!(
        events = schedule.num_events(),
        presenters = schedule.num_presenters(),
        "Schedule loaded"
    );
    Ok(schedule)
}

#[cfg(test)]
mod golden_tests;
