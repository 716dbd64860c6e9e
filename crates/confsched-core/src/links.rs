//! Link normalization for presenter and company links.
//!
//! The upstream data enters social and company links by hand, so the same
//! field may hold `https://x.com/jane`, `x.com/jane`, or a sentence such as
//! `ask me on discord`. [`normalize_link`] turns bare hosts into `https://`
//! URLs and leaves everything else alone.
//!
//! # Example
//!
//! ```
//! use confsched_core::links::normalize_link;
//!
//! assert_eq!(normalize_link("x.com/jane"), "https://x.com/jane");
//! assert_eq!(normalize_link("ask me on discord"), "ask me on discord");
//! ```

/// Schemes that mark a value as an already complete URL.
const URL_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Normalizes a raw link value.
///
/// Surrounding whitespace is trimmed first. Then:
/// - empty input yields an empty string
/// - input containing a space is free text and is returned as is
/// - input starting with `http://` or `https://` is returned as is
/// - anything else gets an `https://` prefix
pub fn normalize_link(raw: &str) -> String {
    let link = raw.trim();
    if link.is_empty() {
        return String::new();
    }
    if link.contains(' ') || URL_SCHEMES.iter().any(|scheme| link.starts_with(scheme)) {
        return link.to_string();
    }
    format!("https://{link}")
}

/// Normalizes an optional raw link; absent values yield an empty string.
pub fn normalize_optional_link(raw: Option<&str>) -> String {
    raw.map(normalize_link).unwrap_or_default()
}

/// Builds the deep link for an event from the site base URL and its slug.
///
/// Returns `None` when the slug is absent or blank.
pub fn event_link(base_url: &str, slug: Option<&str>) -> Option<String> {
    slug.filter(|s| !s.trim().is_empty())
        .map(|s| format!("{base_url}{s}"))
}
