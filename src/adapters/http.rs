use crate::domain::ports::{ConfigProvider, FetchedPage, HttpFetcher};
use crate::utils::error::{FeedError, Result};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// reqwest-backed fetcher. Every request carries a browser-like user agent
/// (the channel pages reject bare clients) and a bounded total timeout.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
    user_agent: String,
    timeout_secs: u64,
}

impl ReqwestFetcher {
    pub fn new(user_agent: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            user_agent: user_agent.into(),
            timeout_secs,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.user_agent(), config.request_timeout_secs())
    }

    fn map_error(&self, url: &str, error: reqwest::Error) -> FeedError {
        if error.is_timeout() {
            FeedError::TimeoutError {
                url: url.to_string(),
                seconds: self.timeout_secs,
            }
        } else {
            FeedError::HttpError(error)
        }
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn fetch_text(&self, url: &str) -> Result<FetchedPage> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| self.map_error(url, e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_error(url, e))?;
        tracing::debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(FetchedPage { status, body })
    }
}
