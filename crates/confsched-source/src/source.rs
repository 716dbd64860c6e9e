//! PageSource trait definition.
//!
//! A [`PageSource`] produces the raw text the schedule is extracted from.
//! The HTTP source downloads the live schedule page; the file source reads
//! a saved copy of the page (or of its data block) from disk.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tracing::debug;

use crate::error::{ExtractError, ExtractResult};

/// What a source returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    /// A full HTML page embedding the data block.
    Html(String),
    /// The data block's JSON on its own.
    Json(String),
}

impl PageContent {
    /// Returns the raw text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Html(s) | Self::Json(s) => s,
        }
    }

    /// Returns the content kind as a short label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Html(_) => "html",
            Self::Json(_) => "json",
        }
    }
}

/// A boxed future for async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Something the schedule page can be loaded from.
pub trait PageSource: Send + Sync {
    /// Returns a short name for logs.
    fn name(&self) -> &str;

    /// Loads the page content.
    ///
    /// Failures to reach the source are reported as `SourceUnavailable`;
    /// sources never retry on their own.
    fn load(&self) -> BoxFuture<'_, ExtractResult<PageContent>>;
}

/// Reads a saved page from disk.
///
/// Files ending in `.json` are taken as the bare data block; anything else
/// is parsed as HTML.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    /// Creates a file source for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

impl PageSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> BoxFuture<'_, ExtractResult<PageContent>> {
        Box::pin(async move {
            let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
                ExtractError::source_unavailable(format!(
                    "cannot read {}: {e}",
                    self.path.display()
                ))
                .with_source(e)
            })?;
            debug!(path = %self.path.display(), bytes = text.len(), "Read saved page");
            Ok(if self.is_json() {
                PageContent::Json(text)
            } else {
                PageContent::Html(text)
            })
        })
    }
}

/// A source that serves fixed content. Useful for testing.
#[derive(Debug, Clone)]
pub struct StaticSource {
    content: PageContent,
}

impl StaticSource {
    /// Creates a source returning `content` on every load.
    pub fn new(content: PageContent) -> Self {
        Self { content }
    }
}

impl PageSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn load(&self) -> BoxFuture<'_, ExtractResult<PageContent>> {
        let content = self.content.clone();
        Box::pin(async move { Ok(content) })
    }
}
