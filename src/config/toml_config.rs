use crate::config::{
    default_id_setting, validate_provider, DEFAULT_CHANNEL_URL, DEFAULT_FEED_URL_TEMPLATE,
    DEFAULT_MAX_ENTRIES, DEFAULT_THUMBNAIL_URL_TEMPLATE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::core::ConfigProvider;
use crate::utils::error::{FeedError, Result};
use crate::utils::validation::Validate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var regex"));

/// File-based configuration. Every section and key is optional.
///
/// ```toml
/// [channel]
/// default_url = "https://www.youtube.com/@thevaluationschool"
/// default_id = "${DEFAULT_CHANNEL_ID}"
///
/// [feed]
/// max_entries = 3
///
/// [http]
/// timeout_seconds = 5
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub channel: ChannelSection,
    #[serde(default)]
    pub feed: FeedSection,
    #[serde(default)]
    pub http: HttpSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelSection {
    pub default_url: Option<String>,
    /// Empty string disables the fallback channel.
    pub default_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedSection {
    pub url_template: Option<String>,
    pub thumbnail_template: Option<String>,
    pub max_entries: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpSection {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FeedError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FeedError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` references with environment values. Undefined variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures<'_>| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn default_channel_url(&self) -> &str {
        self.channel
            .default_url
            .as_deref()
            .unwrap_or(DEFAULT_CHANNEL_URL)
    }

    fn default_channel_id(&self) -> Option<&str> {
        default_id_setting(self.channel.default_id.as_deref())
    }

    fn feed_url_template(&self) -> &str {
        self.feed
            .url_template
            .as_deref()
            .unwrap_or(DEFAULT_FEED_URL_TEMPLATE)
    }

    fn thumbnail_url_template(&self) -> &str {
        self.feed
            .thumbnail_template
            .as_deref()
            .unwrap_or(DEFAULT_THUMBNAIL_URL_TEMPLATE)
    }

    fn max_entries(&self) -> usize {
        self.feed.max_entries.unwrap_or(DEFAULT_MAX_ENTRIES)
    }

    fn request_timeout_secs(&self) -> u64 {
        self.http.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    fn user_agent(&self) -> &str {
        self.http.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
