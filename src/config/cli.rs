use crate::config::{
    default_id_setting, validate_provider, DEFAULT_CHANNEL_URL, DEFAULT_FEED_URL_TEMPLATE,
    DEFAULT_MAX_ENTRIES, DEFAULT_THUMBNAIL_URL_TEMPLATE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::core::handler::ApiRequest;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "latest-videos")]
#[command(about = "Resolve a channel and print its latest videos as JSON")]
pub struct CliConfig {
    /// Channel page URL to resolve
    #[arg(long)]
    pub url: Option<String>,

    /// Channel id override, skips resolution
    #[arg(long)]
    pub channel_id: Option<String>,

    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long, default_value = DEFAULT_CHANNEL_URL)]
    pub default_channel_url: String,

    /// Fallback channel id; pass an empty string to disable
    #[arg(long)]
    pub default_channel_id: Option<String>,

    #[arg(long, default_value = DEFAULT_FEED_URL_TEMPLATE)]
    pub feed_url_template: String,

    #[arg(long, default_value = DEFAULT_THUMBNAIL_URL_TEMPLATE)]
    pub thumbnail_url_template: String,

    #[arg(long, default_value_t = DEFAULT_MAX_ENTRIES)]
    pub max_entries: usize,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// TOML file; replaces the defaults above
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn to_api_request(&self) -> ApiRequest {
        ApiRequest {
            method: "GET".to_string(),
            url: self.url.clone(),
            channel_id: self.channel_id.clone(),
            limit: self.limit,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn default_channel_url(&self) -> &str {
        &self.default_channel_url
    }

    fn default_channel_id(&self) -> Option<&str> {
        default_id_setting(self.default_channel_id.as_deref())
    }

    fn feed_url_template(&self) -> &str {
        &self.feed_url_template
    }

    fn thumbnail_url_template(&self) -> &str {
        &self.thumbnail_url_template
    }

    fn max_entries(&self) -> usize {
        self.max_entries
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
