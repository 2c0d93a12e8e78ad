use crate::core::patterns;
use crate::domain::model::{
    ChannelId, ChannelReference, FailureReason, Resolution, ResolutionSource,
};
use crate::domain::ports::HttpFetcher;
use crate::utils::error::{FeedError, Result};
use url::Url;

/// Derives a channel id from a channel page URL.
///
/// Strategies run in order and stop at the first hit: explicit id, `/channel/`
/// path segment, then a single fetch of the page scanned for the embedded
/// `channelId`, the `externalId` alias and finally the canonical link. At most
/// one request is issued and it is never retried.
pub struct ChannelResolver<F: HttpFetcher> {
    fetcher: F,
}

impl<F: HttpFetcher> ChannelResolver<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Only an unusable source URL is an `Err`. Fetch failures, non-2xx pages
    /// and pages without an id all come back as `Resolution::Failed`.
    pub async fn resolve(&self, reference: &ChannelReference) -> Result<Resolution> {
        // Explicit override
        if let Some(raw) = reference.explicit_id.as_deref() {
            match ChannelId::parse(raw) {
                Some(id) => {
                    tracing::debug!("Using explicit channel id {}", id);
                    return Ok(Resolution::Resolved {
                        id,
                        source: ResolutionSource::Explicit,
                    });
                }
                None => tracing::warn!("Ignoring malformed channel id override: {:?}", raw),
            }
        }

        // Direct /channel/UC... URL
        if let Some(id) = patterns::channel_id_from_url(&reference.source_url) {
            tracing::debug!("Channel id {} taken from URL path", id);
            return Ok(Resolution::Resolved {
                id,
                source: ResolutionSource::UrlPath,
            });
        }

        // Everything else needs the page itself
        let url = parse_source_url(&reference.source_url)?;

        tracing::debug!("Fetching channel page: {}", url);
        let page = match self.fetcher.fetch_text(url.as_str()).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Channel page fetch failed for {}: {}", url, e);
                return Ok(Resolution::Failed(FailureReason::Transport(e.to_string())));
            }
        };

        if !page.is_success() {
            tracing::warn!("Channel page {} returned HTTP {}", url, page.status);
            return Ok(Resolution::Failed(FailureReason::HttpStatus(page.status)));
        }

        Ok(match scan_channel_page(&page.body) {
            Some((id, source)) => {
                tracing::debug!("Channel id {} found via {:?}", id, source);
                Resolution::Resolved { id, source }
            }
            None => Resolution::Failed(FailureReason::NotFound),
        })
    }

    pub async fn resolve_channel_id(&self, reference: &ChannelReference) -> Result<Option<ChannelId>> {
        Ok(self.resolve(reference).await?.into_channel_id())
    }
}

/// Page strategies in priority order.
pub fn scan_channel_page(html: &str) -> Option<(ChannelId, ResolutionSource)> {
    patterns::embedded_channel_id(html)
        .map(|id| (id, ResolutionSource::EmbeddedChannelId))
        .or_else(|| patterns::embedded_external_id(html).map(|id| (id, ResolutionSource::ExternalId)))
        .or_else(|| {
            patterns::canonical_link_channel_id(html).map(|id| (id, ResolutionSource::CanonicalLink))
        })
}

fn parse_source_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| FeedError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(FeedError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("Unsupported URL scheme: {}", scheme),
        }),
    }
}
