//! HTTP document provider.
//!
//! Fetches documents from the service's JSON endpoint:
//! `GET {base_url}/spreadsheet/{name}.json?key={key}`.

use std::time::Duration;

use sheetdb_core::Document;

use crate::provider::{DocumentProvider, ProviderFailure};
use crate::wire::WireDocument;

/// Configuration for [`HttpProvider`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL of the document service, e.g. "https://api.example.com".
    pub base_url: String,
    /// Request timeout. Default: 30 seconds.
    pub timeout: Duration,
    /// User-Agent header. Default: "sheetdb/<crate version>".
    pub user_agent: String,
}

impl HttpConfig {
    /// Config for a service at `base_url`, with default timeout and agent.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            user_agent: format!("sheetdb/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Document provider backed by an HTTP JSON endpoint.
///
/// Any transport-level failure (connect error, non-2xx status, undecodable
/// body) is reported as the service's `UnknownSpreadsheet` envelope; a body
/// that parses but carries `success: false` is reported with the body's own
/// error code and text.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    http: reqwest::Client,
    base_url: String,
}

impl HttpProvider {
    /// Build a provider from config.
    pub fn new(config: HttpConfig) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl DocumentProvider for HttpProvider {
    async fn fetch(&self, document: &str, key: &str) -> Result<Document, ProviderFailure> {
        let url = format!("{}/spreadsheet/{}.json", self.base_url, document);
        tracing::debug!("Fetching {:?} from {}", document, url);

        let response = self
            .http
            .get(&url)
            .query(&[("key", key)])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Fetch of {:?} failed: {}", document, e);
                ProviderFailure::unknown_spreadsheet()
            })?;

        if !response.status().is_success() {
            tracing::warn!(
                "Fetch of {:?} rejected with status {}",
                document,
                response.status()
            );
            return Err(ProviderFailure::unknown_spreadsheet());
        }

        let wire: WireDocument = response.json().await.map_err(|e| {
            tracing::warn!("Undecodable response for {:?}: {}", document, e);
            ProviderFailure::unknown_spreadsheet()
        })?;

        wire.into_outcome()
    }
}
