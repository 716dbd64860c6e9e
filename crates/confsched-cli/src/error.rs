//! Client error types.

use std::fmt;

use confsched_export::ExportError;
use confsched_source::ExtractError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// The schedule could not be loaded or extracted.
    Source(ExtractError),
    /// Encoding or writing an export failed.
    Export(ExportError),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Source(err) => write!(f, "schedule error: {}", err),
            Self::Export(err) => write!(f, "export error: {}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            Self::Export(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ExtractError> for ClientError {
    fn from(err: ExtractError) -> Self {
        Self::Source(err)
    }
}

impl From<ExportError> for ClientError {
    fn from(err: ExportError) -> Self {
        Self::Export(err)
    }
}
