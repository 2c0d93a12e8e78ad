use crate::utils::error::Result;
use async_trait::async_trait;

/// Status and text body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound GET capability. Transport failures (DNS, refused connection,
/// timeout) are `Err`; every HTTP status, 2xx or not, is `Ok`.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<FetchedPage>;
}

pub trait ConfigProvider: Send + Sync {
    fn default_channel_url(&self) -> &str;
    /// `None` disables the last-resort fallback.
    fn default_channel_id(&self) -> Option<&str>;
    fn feed_url_template(&self) -> &str;
    fn thumbnail_url_template(&self) -> &str;
    fn max_entries(&self) -> usize;
    fn request_timeout_secs(&self) -> u64;
    fn user_agent(&self) -> &str;
}
