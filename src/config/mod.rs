#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use lambda::LambdaConfig;
pub use toml_config::TomlConfig;

use crate::core::extractor::{DEFAULT_ENTRY_LIMIT, MAX_FEED_ENTRIES};
use crate::domain::model::ChannelId;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{FeedError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url, validate_url_template,
};

pub const DEFAULT_CHANNEL_URL: &str = "https://www.youtube.com/@thevaluationschool";
pub const DEFAULT_CHANNEL_ID: &str = "UCYqhvzHrm7JVGx8wXlmvC-w";
pub const DEFAULT_FEED_URL_TEMPLATE: &str =
    "https://www.youtube.com/feeds/videos.xml?channel_id={channel_id}";
pub const DEFAULT_THUMBNAIL_URL_TEMPLATE: &str =
    "https://img.youtube.com/vi/{video_id}/hqdefault.jpg";
pub const DEFAULT_MAX_ENTRIES: usize = DEFAULT_ENTRY_LIMIT;
pub use crate::adapters::http::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

const MAX_TIMEOUT_SECS: u64 = 60;

/// An empty configured default id means "no fallback".
pub(crate) fn default_id_setting(configured: Option<&str>) -> Option<&str> {
    match configured {
        Some(id) if id.trim().is_empty() => None,
        Some(id) => Some(id),
        None => Some(DEFAULT_CHANNEL_ID),
    }
}

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_url("default_channel_url", config.default_channel_url())?;

    if let Some(id) = config.default_channel_id() {
        if ChannelId::parse(id).is_none() {
            return Err(FeedError::InvalidConfigValueError {
                field: "default_channel_id".to_string(),
                value: id.to_string(),
                reason: "Channel ids start with UC followed by letters, digits, '-' or '_'"
                    .to_string(),
            });
        }
    }

    validate_url_template("feed_url_template", config.feed_url_template(), "{channel_id}")?;
    validate_url_template(
        "thumbnail_url_template",
        config.thumbnail_url_template(),
        "{video_id}",
    )?;
    validate_range("max_entries", config.max_entries(), 1, MAX_FEED_ENTRIES)?;
    validate_range(
        "request_timeout_secs",
        config.request_timeout_secs(),
        1,
        MAX_TIMEOUT_SECS,
    )?;
    validate_non_empty_string("user_agent", config.user_agent())?;

    tracing::debug!("✅ Configuration validation passed");
    Ok(())
}
