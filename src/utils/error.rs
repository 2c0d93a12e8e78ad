use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Request to {url} timed out after {seconds}s")]
    TimeoutError { url: String, seconds: u64 },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unable to resolve channelId from URL: {url}")]
    UnresolvedChannel { url: String },

    #[error("Failed to fetch channel feed (status: {status:?})")]
    FeedUnavailable { status: Option<u16>, detail: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Upstream,
    Input,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl FeedError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FeedError::HttpError(_) | FeedError::TimeoutError { .. } => ErrorCategory::Network,
            FeedError::UnresolvedChannel { .. } | FeedError::FeedUnavailable { .. } => {
                ErrorCategory::Upstream
            }
            FeedError::InvalidUrl { .. } => ErrorCategory::Input,
            FeedError::ConfigValidationError { .. } | FeedError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            FeedError::IoError(_) | FeedError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// Short message suitable for an end user or a CLI prompt.
    pub fn user_friendly_message(&self) -> String {
        match self {
            FeedError::HttpError(_) | FeedError::TimeoutError { .. } => {
                "Could not reach the video platform".to_string()
            }
            FeedError::InvalidUrl { url, .. } => format!("'{}' is not a usable channel URL", url),
            FeedError::UnresolvedChannel { url } => {
                format!("Could not find a channel id for {}", url)
            }
            FeedError::FeedUnavailable { .. } => "The channel feed is unavailable".to_string(),
            FeedError::ConfigValidationError { .. } | FeedError::InvalidConfigValueError { .. } => {
                format!("Invalid configuration: {}", self)
            }
            FeedError::IoError(_) | FeedError::SerializationError(_) => {
                format!("Internal error: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity or raise the request timeout",
            ErrorCategory::Upstream => {
                "Pass an explicit channel id or configure a default channel id"
            }
            ErrorCategory::Input => "Use an absolute http(s) channel URL",
            ErrorCategory::Configuration => "Fix the configuration value named in the error",
            ErrorCategory::Internal => "Re-run with --verbose and report the log output",
        }
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
