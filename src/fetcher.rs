use crate::error::FetchError;
use crate::http_client::build_http_client;
use anyhow::Result;
use std::future::Future;
use url::Url;

/// What the analyzer needs from a fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status_code: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl FetchedPage {
    /// 2xx and 3xx are both treated as a usable response.
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status_code)
    }
}

pub trait PageFetcher: Send + Sync + 'static {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send;
}

/// Single GET per call; no retries.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout_secs)?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        if let Some(ref ct) = content_type {
            let ct_lower = ct.to_lowercase();
            if !ct_lower.contains("text/html") && !ct_lower.contains("application/xhtml") {
                tracing::warn!(
                    url = %url,
                    content_type = %ct,
                    "Non-HTML content type detected, parsing may fail"
                );
            }
        }

        let body = response.text().await.map_err(FetchError::Body)?;

        tracing::debug!(url = %url, status = status_code, bytes = body.len(), "Fetched page");

        Ok(FetchedPage {
            status_code,
            content_type,
            body,
        })
    }
}
