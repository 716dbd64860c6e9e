//! Schedule source configuration.

use std::time::Duration;
use url::Url;

/// Schedule page of the AI Engineer World's Fair 2024.
pub const DEFAULT_SCHEDULE_URL: &str = "https://www.ai.engineer/worldsfair/2024/schedule";

/// Prefix that turns an event slug into a session page URL.
pub const DEFAULT_EVENT_BASE_URL: &str = "https://www.ai.engineer/worldsfair/2024/schedule/";

/// Where to fetch the schedule from and how to build event links.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// The page embedding the schedule payload.
    pub schedule_url: Url,

    /// Prefix for event deep links; the slug is appended verbatim.
    pub event_base_url: Url,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl SourceConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a configuration for the given page and event base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if either URL is invalid.
    pub fn new(
        schedule_url: impl AsRef<str>,
        event_base_url: impl AsRef<str>,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            schedule_url: Url::parse(schedule_url.as_ref())?,
            event_base_url: Url::parse(event_base_url.as_ref())?,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("confsched/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Creates a configuration for the default schedule.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the defaults are valid URLs.
    pub fn with_defaults() -> Result<Self, url::ParseError> {
        Self::new(DEFAULT_SCHEDULE_URL, DEFAULT_EVENT_BASE_URL)
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Checks settings that parse but cannot work.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout.is_zero() {
            return Err("timeout must be greater than zero".to_string());
        }
        for (name, url) in [
            ("schedule_url", &self.schedule_url),
            ("event_base_url", &self.event_base_url),
        ] {
            if !matches!(url.scheme(), "http" | "https") {
                return Err(format!("{name} must be an http(s) URL, got {url}"));
            }
        }
        Ok(())
    }
}
