//! Fetching the papers page.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};

use crate::{domain::PaperRecord, errors::Error, extract, Result};

/// Source of paper records. The production implementation scrapes the live
/// page; tests substitute a canned source.
#[async_trait]
pub trait PaperSource: Send + Sync {
    /// Fetch and extract. Failures degrade to an empty list (logged), never
    /// an error: the user-facing path only distinguishes "papers" from
    /// "no papers".
    async fn fetch_papers(&self, filter_year: Option<&str>) -> Vec<PaperRecord>;
}

/// Scrapes a fixed page over HTTP with a browser-like header set.
pub struct WebPaperSource {
    client: reqwest::Client,
    url: String,
}

impl WebPaperSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        // Some hosts reject default client UAs outright.
        let user_agent = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(format!("http client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn fetch_html(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("fetch {}: {e}", self.url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport(format!("fetch {}: HTTP {status}", self.url)));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Transport(format!("read body: {e}")))
    }
}

#[async_trait]
impl PaperSource for WebPaperSource {
    async fn fetch_papers(&self, filter_year: Option<&str>) -> Vec<PaperRecord> {
        tracing::info!(url = %self.url, "fetching papers page");
        let html = match self.fetch_html().await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(error = %e, "scrape failed, treating as zero candidates");
                return Vec::new();
            }
        };
        extract::extract_papers(&html, &self.url, filter_year)
    }
}
