use serde::{Deserialize, Serialize};
use std::fmt;

/// What the caller handed us: a channel page URL and, optionally, an id that
/// bypasses resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelReference {
    pub source_url: String,
    pub explicit_id: Option<String>,
}

impl ChannelReference {
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            explicit_id: None,
        }
    }

    pub fn with_explicit_id(mut self, explicit_id: Option<String>) -> Self {
        self.explicit_id = explicit_id.filter(|id| !id.trim().is_empty());
        self
    }
}

/// Platform channel identifier: `UC` followed by `[A-Za-z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub const PREFIX: &'static str = "UC";

    /// Returns `None` unless `raw` (after trimming) looks like a channel id.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let suffix = raw.strip_prefix(Self::PREFIX)?;
        if suffix.is_empty() {
            return None;
        }
        let well_formed = suffix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        well_formed.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One video pulled from the channel feed. Serialized with the field names the
/// frontend expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    /// Empty when the feed entry carried no id; callers treat empty as missing.
    #[serde(rename = "id")]
    pub video_id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
}

/// Which strategy produced a resolved id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Explicit,
    UrlPath,
    EmbeddedChannelId,
    ExternalId,
    CanonicalLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    HttpStatus(u16),
    Transport(String),
    NotFound,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::HttpStatus(status) => write!(f, "channel page returned HTTP {}", status),
            FailureReason::Transport(message) => write!(f, "channel page fetch failed: {}", message),
            FailureReason::NotFound => f.write_str("no channel id found in channel page"),
        }
    }
}

/// Outcome of channel resolution. Absence is an ordinary result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved {
        id: ChannelId,
        source: ResolutionSource,
    },
    Failed(FailureReason),
}

impl Resolution {
    pub fn channel_id(&self) -> Option<&ChannelId> {
        match self {
            Resolution::Resolved { id, .. } => Some(id),
            Resolution::Failed(_) => None,
        }
    }

    pub fn into_channel_id(self) -> Option<ChannelId> {
        match self {
            Resolution::Resolved { id, .. } => Some(id),
            Resolution::Failed(_) => None,
        }
    }
}
