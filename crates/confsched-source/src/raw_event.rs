//! Raw schedule records as they appear in the page payload.
//!
//! The schedule page embeds a CMS export whose records are loosely typed:
//! identifiers are sometimes strings and sometimes integers, free-text fields
//! can be `null`, and nested references (`company.data`) may be missing.
//! Every field except the identifiers is optional here; fill rules are
//! applied later by [`crate::normalize`].
//!
//! Shape of one event:
//!
//! ```text
//! { title, trackName, about, room, since, till, slug,
//!   presenters: [ { id, attributes: { name, tagline, about, socialLinks,
//!                                     company: { data: { id, attributes:
//!                                       { name, link, socialLinks } } } } } ] }
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A source identifier, published either as a string or as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for RawId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for RawId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// One event record from `props.pageProps.schedule.events`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub track_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub about: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub room: Option<String>,

    /// Start time as published (RFC 3339).
    #[serde(default, deserialize_with = "lenient_string")]
    pub since: Option<String>,

    /// End time as published (RFC 3339).
    #[serde(default, deserialize_with = "lenient_string")]
    pub till: Option<String>,

    /// URL path fragment of the session page.
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub presenters: Vec<RawPresenter>,
}

impl RawEvent {
    /// Creates a raw event with a title and a track.
    pub fn new(title: impl Into<String>, track_name: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            track_name: Some(track_name.into()),
            ..Default::default()
        }
    }

    /// Builder method to set the room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Builder method to set start and end.
    pub fn with_times(mut self, since: impl Into<String>, till: impl Into<String>) -> Self {
        self.since = Some(since.into());
        self.till = Some(till.into());
        self
    }

    /// Builder method to set the slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Builder method to add a presenter reference.
    pub fn with_presenter(mut self, presenter: RawPresenter) -> Self {
        self.presenters.push(presenter);
        self
    }
}

/// A presenter reference inside an event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPresenter {
    pub id: RawId,
    #[serde(default)]
    pub attributes: Option<RawPresenterAttributes>,
}

impl RawPresenter {
    /// Creates a presenter reference with a name and nothing else.
    pub fn new(id: impl Into<RawId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Some(RawPresenterAttributes {
                name: Some(name.into()),
                ..Default::default()
            }),
        }
    }

    /// Builder method to set the tagline.
    pub fn with_tagline(mut self, tagline: impl Into<String>) -> Self {
        self.attributes_mut().tagline = Some(tagline.into());
        self
    }

    /// Builder method to set the raw social link.
    pub fn with_social_links(mut self, link: impl Into<String>) -> Self {
        self.attributes_mut().social_links = Some(link.into());
        self
    }

    /// Builder method to set the biography.
    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.attributes_mut().about = Some(about.into());
        self
    }

    /// Builder method to set the company reference.
    pub fn with_company(mut self, company: RawCompany) -> Self {
        self.attributes_mut().company = Some(RawCompanyRef {
            data: Some(company),
        });
        self
    }

    fn attributes_mut(&mut self) -> &mut RawPresenterAttributes {
        self.attributes.get_or_insert_with(Default::default)
    }
}

/// The attributes of a presenter reference.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPresenterAttributes {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub tagline: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub about: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub social_links: Option<String>,

    #[serde(default)]
    pub company: Option<RawCompanyRef>,
}

/// The `company` wrapper of a presenter: `{ "data": { ... } | null }`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCompanyRef {
    #[serde(default)]
    pub data: Option<RawCompany>,
}

/// A company record nested in a presenter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCompany {
    pub id: RawId,
    #[serde(default)]
    pub attributes: Option<RawCompanyAttributes>,
}

impl RawCompany {
    /// Creates a company record with a name and no links.
    pub fn new(id: impl Into<RawId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Some(RawCompanyAttributes {
                name: Some(name.into()),
                ..Default::default()
            }),
        }
    }

    /// Builder method to set the raw links.
    pub fn with_links(mut self, link: impl Into<String>, social_links: impl Into<String>) -> Self {
        let attributes = self.attributes.get_or_insert_with(Default::default);
        attributes.link = Some(link.into());
        attributes.social_links = Some(social_links.into());
        self
    }
}

/// The attributes of a company record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCompanyAttributes {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub link: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub social_links: Option<String>,
}

/// Reads a free-text field that may be null, a string, or a scalar.
///
/// Numbers and booleans keep their JSON spelling; nested values are kept as
/// JSON text rather than failing the whole extraction.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
