//! Error types for schedule extraction.
//!
//! Extraction either yields a complete [`Schedule`](confsched_core::Schedule)
//! or fails as a whole. Failures are classified so that callers can tell an
//! unreachable page from a page without a data block, and both from a data
//! block whose structure changed.

use std::fmt;
use thiserror::Error;

/// The category of an extraction error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractErrorCode {
    /// The schedule page could not be retrieved.
    SourceUnavailable,
    /// The page has no embedded structured-data block.
    BlockNotFound,
    /// The data block exists but does not have the expected structure.
    UnexpectedShape,
    /// Invalid source configuration.
    ConfigurationError,
}

impl ExtractErrorCode {
    /// Returns true if a later attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::SourceUnavailable)
    }

    /// Returns true if the page was retrieved but its data is unusable.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::BlockNotFound | Self::UnexpectedShape)
    }

    /// Returns a machine-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SourceUnavailable => "source_unavailable",
            Self::BlockNotFound => "block_not_found",
            Self::UnexpectedShape => "unexpected_shape",
            Self::ConfigurationError => "configuration_error",
        }
    }
}

impl fmt::Display for ExtractErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that aborted schedule extraction.
#[derive(Debug, Error)]
pub struct ExtractError {
    code: ExtractErrorCode,
    message: String,
    /// Where in the payload the problem was found, e.g. `props.pageProps`.
    path: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ExtractError {
    /// Creates a new error with the given code and message.
    pub fn new(code: ExtractErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Creates a source-unavailable error.
    pub fn source_unavailable(message: impl Into<String>) -> Self {
        Self::new(ExtractErrorCode::SourceUnavailable, message)
    }

    /// Creates a block-not-found error.
    pub fn block_not_found(message: impl Into<String>) -> Self {
        Self::new(ExtractErrorCode::BlockNotFound, message)
    }

    /// Creates an unexpected-shape error.
    pub fn unexpected_shape(message: impl Into<String>) -> Self {
        Self::new(ExtractErrorCode::UnexpectedShape, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ExtractErrorCode::ConfigurationError, message)
    }

    /// Sets the payload path this error refers to.
    pub fn at_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ExtractErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the payload path, if set.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns true if a later attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }

    /// Returns true if the page was retrieved but its data is unusable.
    pub fn is_shape_error(&self) -> bool {
        self.code.is_shape_error()
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(ref path) = self.path {
            write!(f, " (at {})", path)?;
        }
        Ok(())
    }
}

/// A specialized Result type for extraction.
pub type ExtractResult<T> = Result<T, ExtractError>;
