use crate::config::{
    default_id_setting, validate_provider, DEFAULT_CHANNEL_URL, DEFAULT_FEED_URL_TEMPLATE,
    DEFAULT_MAX_ENTRIES, DEFAULT_THUMBNAIL_URL_TEMPLATE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::core::ConfigProvider;
use crate::utils::error::{FeedError, Result};
use crate::utils::validation::Validate;
use std::env;
use std::str::FromStr;

/// Settings for the serverless deployment, read from the function's environment.
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub default_channel_url: String,
    pub default_channel_id: Option<String>,
    pub feed_url_template: String,
    pub thumbnail_url_template: String,
    pub max_entries: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let string_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            default_channel_url: string_or("DEFAULT_CHANNEL_URL", DEFAULT_CHANNEL_URL),
            default_channel_id: default_id_setting(lookup("DEFAULT_CHANNEL_ID").as_deref())
                .map(str::to_string),
            feed_url_template: string_or("FEED_URL_TEMPLATE", DEFAULT_FEED_URL_TEMPLATE),
            thumbnail_url_template: string_or(
                "THUMBNAIL_URL_TEMPLATE",
                DEFAULT_THUMBNAIL_URL_TEMPLATE,
            ),
            max_entries: parse_var("MAX_ENTRIES", lookup("MAX_ENTRIES"), DEFAULT_MAX_ENTRIES)?,
            request_timeout_secs: parse_var(
                "REQUEST_TIMEOUT_SECS",
                lookup("REQUEST_TIMEOUT_SECS"),
                DEFAULT_TIMEOUT_SECS,
            )?,
            user_agent: string_or("USER_AGENT", DEFAULT_USER_AGENT),
        })
    }
}

fn parse_var<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| FeedError::InvalidConfigValueError {
                field: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}

impl ConfigProvider for LambdaConfig {
    fn default_channel_url(&self) -> &str {
        &self.default_channel_url
    }

    fn default_channel_id(&self) -> Option<&str> {
        self.default_channel_id.as_deref()
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
        self.request_timeout_secs
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)?;
        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}
