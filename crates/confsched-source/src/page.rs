//! Locating the schedule payload inside the page.
//!
//! The schedule site is a Next.js app: the data the page was rendered from
//! sits in `<script id="__NEXT_DATA__" type="application/json">`. The events
//! live at `props.pageProps.schedule.events`; every key on that path is
//! required.

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::raw_event::RawEvent;

/// CSS selector of the embedded data block.
pub const DATA_BLOCK_SELECTOR: &str = "script#__NEXT_DATA__";

/// Keys leading from the payload root to the event list.
pub const EVENTS_PATH: [&str; 4] = ["props", "pageProps", "schedule", "events"];

/// Returns the text of the first embedded data block in `html`.
///
/// # Errors
///
/// Returns a `BlockNotFound` error when the page has no such block.
pub fn find_data_block(html: &str) -> ExtractResult<String> {
    let selector = Selector::parse(DATA_BLOCK_SELECTOR).map_err(|e| {
        ExtractError::configuration(format!("invalid data block selector: {e:?}"))
    })?;
    let document = Html::parse_document(html);
    let block = document
        .select(&selector)
        .next()
        .map(|script| script.text().collect::<String>())
        .ok_or_else(|| {
            ExtractError::block_not_found(format!(
                "page has no <script id=\"__NEXT_DATA__\"> block ({} bytes scanned)",
                html.len()
            ))
        })?;
    debug!(bytes = block.len(), "Found embedded data block");
    Ok(block)
}

/// Parses the data block text as JSON.
///
/// # Errors
///
/// Returns an `UnexpectedShape` error when the block is not valid JSON.
pub fn parse_payload(block: &str) -> ExtractResult<Value> {
    serde_json::from_str(block).map_err(|e| {
        ExtractError::unexpected_shape(format!("data block is not valid JSON: {e}")).with_source(e)
    })
}

/// Walks `props.pageProps.schedule.events` and decodes every event.
///
/// # Errors
///
/// Returns an `UnexpectedShape` error naming the first missing key, a
/// non-list `events` value, or the first event that fails to decode. No
/// events are returned if any of them is malformed.
pub fn resolve_events(payload: Value) -> ExtractResult<Vec<RawEvent>> {
    let mut current = payload;
    for (depth, key) in EVENTS_PATH.iter().enumerate() {
        let parent = path_label(&EVENTS_PATH[..depth]);
        current = match current {
            Value::Object(mut map) => map.remove(*key).ok_or_else(|| {
                ExtractError::unexpected_shape(format!("missing key `{key}`")).at_path(&parent)
            })?,
            other => {
                return Err(ExtractError::unexpected_shape(format!(
                    "expected an object, found {}",
                    kind_of(&other)
                ))
                .at_path(&parent));
            }
        };
    }

    let events_path = path_label(&EVENTS_PATH);
    let Value::Array(items) = current else {
        return Err(ExtractError::unexpected_shape(format!(
            "expected a list of events, found {}",
            kind_of(&current)
        ))
        .at_path(events_path));
    };

    let events = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<RawEvent>(item).map_err(|e| {
                ExtractError::unexpected_shape(format!("event {index} cannot be decoded: {e}"))
                    .at_path(format!("{events_path}[{index}]"))
                    .with_source(e)
            })
        })
        .collect::<ExtractResult<Vec<_>>>()?;

    debug!(count = events.len(), "Decoded raw events");
    Ok(events)
}

fn path_label(keys: &[&str]) -> String {
    if keys.is_empty() {
        "<root>".to_string()
    } else {
        keys.join(".")
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractErrorCode;
    use serde_json::json;

    fn page(block: &str) -> String {
        format!(
            "<html><head><title>Schedule</title></head><body><div id=\"__next\"></div>\
             <script id=\"__NEXT_DATA__\" type=\"application/json\">{block}</script></body></html>"
        )
    }

    mod data_block {
        use super::*;

        #[test]
        fn finds_block_text() {
            let block = find_data_block(&page(r#"{"props":{}}"#)).unwrap();
            assert_eq!(block, r#"{"props":{}}"#);
        }

        #[test]
        fn takes_first_block() {
            let html = format!(
                "{}<script id=\"__NEXT_DATA__\">{{\"second\":true}}</script>",
                page(r#"{"first":true}"#)
            );
            assert_eq!(find_data_block(&html).unwrap(), r#"{"first":true}"#);
        }

        #[test]
        fn missing_block() {
            let err = find_data_block("<html><body><script>var x = 1;</script></body></html>")
                .unwrap_err();
            assert_eq!(err.code(), ExtractErrorCode::BlockNotFound);
        }

        #[test]
        fn invalid_json_is_shape_error() {
            let err = parse_payload("{not json").unwrap_err();
            assert_eq!(err.code(), ExtractErrorCode::UnexpectedShape);
        }
    }

    mod events_path {
        use super::*;

        #[test]
        fn resolves_events() {
            let payload = json!({
                "props": {"pageProps": {"schedule": {"events": [
                    {"title": "Talk 1"},
                    {"title": "Talk 2"}
                ]}}}
            });
            let events = resolve_events(payload).unwrap();
            assert_eq!(events.len(), 2);
            assert_eq!(events[1].title.as_deref(), Some("Talk 2"));
        }

        #[test]
        fn empty_list_is_fine() {
            let payload = json!({"props": {"pageProps": {"schedule": {"events": []}}}});
            assert!(resolve_events(payload).unwrap().is_empty());
        }

        #[test]
        fn missing_key_names_key_and_parent() {
            let payload = json!({"props": {"pageProps": {"speakers": []}}});
            let err = resolve_events(payload).unwrap_err();
            assert_eq!(err.code(), ExtractErrorCode::UnexpectedShape);
            assert!(err.message().contains("`schedule`"));
            assert_eq!(err.path(), Some("props.pageProps"));
        }

        #[test]
        fn missing_root_key() {
            let err = resolve_events(json!({"page": "/schedule"})).unwrap_err();
            assert!(err.message().contains("`props`"));
            assert_eq!(err.path(), Some("<root>"));
        }

        #[test]
        fn non_object_on_path() {
            let err = resolve_events(json!({"props": {"pageProps": []}})).unwrap_err();
            assert!(err.message().contains("expected an object, found a list"));
            assert_eq!(err.path(), Some("props.pageProps"));
        }

        #[test]
        fn events_must_be_a_list() {
            let payload = json!({"props": {"pageProps": {"schedule": {"events": null}}}});
            let err = resolve_events(payload).unwrap_err();
            assert!(err.message().contains("found null"));
            assert_eq!(err.path(), Some("props.pageProps.schedule.events"));
        }

        #[test]
        fn one_bad_event_fails_everything() {
            let payload = json!({
                "props": {"pageProps": {"schedule": {"events": [
                    {"title": "Talk 1"},
                    {"title": "Talk 2", "presenters": [{"attributes": {"name": "No Id"}}]}
                ]}}}
            });
            let err = resolve_events(payload).unwrap_err();
            assert_eq!(err.code(), ExtractErrorCode::UnexpectedShape);
            assert_eq!(err.path(), Some("props.pageProps.schedule.events[1]"));
        }
    }
}
