use crate::core::extractor::{FeedExtractor, MAX_FEED_ENTRIES};
use crate::core::resolver::ChannelResolver;
use crate::domain::model::{ChannelId, ChannelReference, FeedEntry, Resolution};
use crate::domain::ports::{ConfigProvider, HttpFetcher};
use crate::utils::error::{FeedError, Result};
use serde::Serialize;
use std::collections::HashMap;

pub const ERROR_UNRESOLVED: &str = "Unable to resolve channelId from URL";
pub const ERROR_FEED_UNAVAILABLE: &str = "Failed to fetch channel feed";
pub const ERROR_SERVER: &str = "Server error";
pub const ERROR_METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// The parts of an incoming `GET /api/latest-videos` request the handler reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: String,
    pub url: Option<String>,
    pub channel_id: Option<String>,
    pub limit: Option<usize>,
}

impl ApiRequest {
    pub fn get() -> Self {
        Self {
            method: "GET".to_string(),
            ..Self::default()
        }
    }

    /// Blank parameters count as absent; an unparsable `limit` is dropped.
    pub fn from_query(method: &str, query: &HashMap<String, String>) -> Self {
        let param = |name: &str| {
            query
                .get(name)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let limit = param("limit").and_then(|raw| match raw.parse::<usize>() {
            Ok(limit) => Some(limit),
            Err(_) => {
                tracing::warn!("Ignoring unparsable limit parameter: {:?}", raw);
                None
            }
        });

        Self {
            method: method.to_ascii_uppercase(),
            url: param("url"),
            channel_id: param("channelId"),
            limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Videos { videos: Vec<FeedEntry> },
    Unresolved { error: String, url: String },
    Failure { error: String, detail: String },
    Message { error: String },
}

/// How a request ended, for operator logs. The page renders `Empty` and
/// `FeedUnavailable` identically, so this is the only place they differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Empty,
    Preflight,
    MethodNotAllowed,
    Unresolved,
    FeedUnavailable,
    ServerError,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::Empty => "empty",
            Outcome::Preflight => "preflight",
            Outcome::MethodNotAllowed => "method_not_allowed",
            Outcome::Unresolved => "unresolved",
            Outcome::FeedUnavailable => "feed_unavailable",
            Outcome::ServerError => "server_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<ResponseBody>,
    pub outcome: Outcome,
}

impl ApiResponse {
    fn new(status: u16, body: Option<ResponseBody>, outcome: Outcome) -> Self {
        let mut headers = vec![
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
            (
                "Access-Control-Allow-Methods".to_string(),
                "GET, OPTIONS".to_string(),
            ),
        ];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        Self {
            status,
            headers,
            body,
            outcome,
        }
    }

    /// `500 {"error":"Server error","detail":...}` with the usual CORS headers.
    pub fn server_error(error: &FeedError) -> Self {
        Self::new(
            500,
            Some(ResponseBody::Failure {
                error: ERROR_SERVER.to_string(),
                detail: error.to_string(),
            }),
            Outcome::ServerError,
        )
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Serialized body, or an empty string for bodiless responses.
    pub fn body_json(&self) -> Result<String> {
        match &self.body {
            Some(body) => Ok(serde_json::to_string(body)?),
            None => Ok(String::new()),
        }
    }

    pub fn videos(&self) -> Option<&[FeedEntry]> {
        match &self.body {
            Some(ResponseBody::Videos { videos }) => Some(videos),
            _ => None,
        }
    }
}

/// Boundary adapter: request in, JSON envelope out. Every invocation is
/// independent; nothing is cached between calls.
pub struct LatestVideosHandler<F: HttpFetcher + Clone, C: ConfigProvider> {
    config: C,
    resolver: ChannelResolver<F>,
    extractor: FeedExtractor<F>,
}

impl<F: HttpFetcher + Clone, C: ConfigProvider> LatestVideosHandler<F, C> {
    pub fn new(fetcher: F, config: C) -> Self {
        let extractor = FeedExtractor::new(
            fetcher.clone(),
            config.feed_url_template(),
            config.thumbnail_url_template(),
        );
        Self {
            resolver: ChannelResolver::new(fetcher),
            extractor,
            config,
        }
    }

    pub async fn handle(&self, request: &ApiRequest) -> ApiResponse {
        // Preflight is answered before anything touches the network.
        let response = match request.method.as_str() {
            "OPTIONS" => ApiResponse::new(200, None, Outcome::Preflight),
            "GET" => self.handle_get(request).await,
            _ => ApiResponse::new(
                405,
                Some(ResponseBody::Message {
                    error: ERROR_METHOD_NOT_ALLOWED.to_string(),
                }),
                Outcome::MethodNotAllowed,
            ),
        };

        tracing::info!(
            method = %request.method,
            status = response.status,
            outcome = response.outcome.as_str(),
            "latest-videos request handled"
        );
        response
    }

    async fn handle_get(&self, request: &ApiRequest) -> ApiResponse {
        match self.latest_videos(request).await {
            // An empty feed is still a success; only the log outcome differs.
            Ok(videos) => {
                let outcome = if videos.is_empty() {
                    Outcome::Empty
                } else {
                    Outcome::Ok
                };
                ApiResponse::new(200, Some(ResponseBody::Videos { videos }), outcome)
            }
            Err(FeedError::UnresolvedChannel { url }) => {
                tracing::error!("❌ No channel id for {} and no usable default", url);
                ApiResponse::new(
                    500,
                    Some(ResponseBody::Unresolved {
                        error: ERROR_UNRESOLVED.to_string(),
                        url,
                    }),
                    Outcome::Unresolved,
                )
            }
            Err(FeedError::FeedUnavailable { status, detail }) => {
                tracing::error!("❌ Channel feed unavailable (status: {:?})", status);
                ApiResponse::new(
                    500,
                    Some(ResponseBody::Failure {
                        error: ERROR_FEED_UNAVAILABLE.to_string(),
                        detail,
                    }),
                    Outcome::FeedUnavailable,
                )
            }
            Err(e) => {
                tracing::error!(
                    "❌ latest-videos failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                ApiResponse::server_error(&e)
            }
        }
    }

    /// Resolves the channel, then fetches its feed.
    pub async fn latest_videos(&self, request: &ApiRequest) -> Result<Vec<FeedEntry>> {
        // No url parameter means the configured channel page.
        let source_url = request
            .url
            .clone()
            .unwrap_or_else(|| self.config.default_channel_url().to_string());
        let reference =
            ChannelReference::new(source_url).with_explicit_id(request.channel_id.clone());

        let channel_id = self.select_channel(&reference).await?;

        // Caller-supplied limits are capped at what a channel feed can carry.
        let limit = request
            .limit
            .unwrap_or_else(|| self.config.max_entries())
            .min(MAX_FEED_ENTRIES);

        self.extractor.fetch_latest_entries(&channel_id, limit).await
    }

    /// Explicit id, then resolution, then the configured default.
    pub async fn select_channel(&self, reference: &ChannelReference) -> Result<ChannelId> {
        match self.resolver.resolve(reference).await? {
            Resolution::Resolved { id, source } => {
                tracing::info!("Resolved channel {} via {:?}", id, source);
                Ok(id)
            }
            Resolution::Failed(reason) => {
                // Malformed or blank defaults count as no default.
                let default = self.config.default_channel_id().and_then(ChannelId::parse);
                match default {
                    Some(id) => {
                        tracing::warn!(
                            "Falling back to default channel {} ({})",
                            id,
                            reason
                        );
                        Ok(id)
                    }
                    None => {
                        tracing::warn!("Channel resolution failed: {}", reason);
                        Err(FeedError::UnresolvedChannel {
                            url: reference.source_url.clone(),
                        })
                    }
                }
            }
        }
    }
}
