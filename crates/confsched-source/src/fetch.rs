//! HTTP source for the live schedule page.

use reqwest::Client;
use tracing::{debug, info, trace};

use crate::config::SourceConfig;
use crate::error::{ExtractError, ExtractResult};
use crate::source::{BoxFuture, PageContent, PageSource};

/// Downloads the schedule page over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    config: SourceConfig,
    client: Client,
}

impl HttpSource {
    /// Creates an HTTP source.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: SourceConfig) -> ExtractResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ExtractError::configuration(format!("failed to create HTTP client: {e}"))
                    .with_source(e)
            })?;
        Ok(Self { config, client })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    async fn fetch(&self) -> ExtractResult<PageContent> {
        let url = self.config.schedule_url.clone();
        info!(url = %url, "Fetching schedule page");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            ExtractError::source_unavailable(format!("request to {url} failed: {e}"))
                .with_source(e)
        })?;

        let status = response.status();
        trace!(status = %status, "Schedule page response");
        if !status.is_success() {
            return Err(ExtractError::source_unavailable(format!(
                "{url} returned HTTP {status}"
            )));
        }

        let body = response.text().await.map_err(|e| {
            ExtractError::source_unavailable(format!("failed to read body of {url}: {e}"))
                .with_source(e)
        })?;
        debug!(bytes = body.len(), "Downloaded schedule page");
        Ok(PageContent::Html(body))
    }
}

impl PageSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn load(&self) -> BoxFuture<'_, ExtractResult<PageContent>> {
        Box::pin(self.fetch())
    }
}
