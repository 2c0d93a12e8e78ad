use crate::core::patterns;
use crate::domain::model::{ChannelId, FeedEntry};
use crate::domain::ports::HttpFetcher;
use crate::utils::error::{FeedError, Result};

/// Number of entries the frontend has slots for.
pub const DEFAULT_ENTRY_LIMIT: usize = 3;

/// A channel feed never lists more than this many videos.
pub const MAX_FEED_ENTRIES: usize = 15;

pub struct FeedExtractor<F: HttpFetcher> {
    fetcher: F,
    feed_url_template: String,
    thumbnail_url_template: String,
}

impl<F: HttpFetcher> FeedExtractor<F> {
    pub fn new(
        fetcher: F,
        feed_url_template: impl Into<String>,
        thumbnail_url_template: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            feed_url_template: feed_url_template.into(),
            thumbnail_url_template: thumbnail_url_template.into(),
        }
    }

    pub fn feed_url(&self, channel_id: &ChannelId) -> String {
        self.feed_url_template
            .replace("{channel_id}", channel_id.as_str())
    }

    /// Fetches the channel feed once and returns its first `limit` entries in
    /// feed order. Unlike resolution, a failed fetch here is an error.
    pub async fn fetch_latest_entries(
        &self,
        channel_id: &ChannelId,
        limit: usize,
    ) -> Result<Vec<FeedEntry>> {
        let feed_url = self.feed_url(channel_id);
        tracing::debug!("Fetching channel feed: {}", feed_url);

        let page = self
            .fetcher
            .fetch_text(&feed_url)
            .await
            .map_err(|e| FeedError::FeedUnavailable {
                status: None,
                detail: e.to_string(),
            })?;

        tracing::debug!("Feed response status: {}", page.status);

        if !page.is_success() {
            return Err(FeedError::FeedUnavailable {
                status: Some(page.status),
                detail: page.body,
            });
        }

        let entries = parse_entries(&page.body, limit, &self.thumbnail_url_template);
        tracing::debug!("Extracted {} entries for channel {}", entries.len(), channel_id);
        Ok(entries)
    }
}

/// Splits `xml` into at most `limit` entry fragments and extracts each one
/// independently. A `limit` of 0 yields no entries.
pub fn parse_entries(xml: &str, limit: usize, thumbnail_url_template: &str) -> Vec<FeedEntry> {
    patterns::entry_fragments(xml, limit)
        .into_iter()
        .map(|fragment| parse_entry(fragment, thumbnail_url_template))
        .collect()
}

pub fn parse_entry(fragment: &str, thumbnail_url_template: &str) -> FeedEntry {
    let video_id = patterns::video_id(fragment);
    let thumbnail_url = patterns::media_thumbnail(fragment)
        .unwrap_or_else(|| patterns::synthesized_thumbnail(thumbnail_url_template, &video_id));

    FeedEntry {
        title: patterns::title(fragment),
        description: patterns::media_description(fragment),
        published_at: patterns::published_at(fragment),
        thumbnail_url,
        video_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::RecordingFetcher;

    const FEED_TEMPLATE: &str = "https://feeds.example/videos.xml?channel_id={channel_id}";
    const THUMB_TEMPLATE: &str = "https://img.youtube.com/vi/{video_id}/hqdefault.jpg";

    fn feed_entry_xml(n: usize) -> String {
        format!(
            r#"<entry>
  <id>yt:video:vid{n}</id>
  <yt:videoId>vid{n}</yt:videoId>
  <title>  Video {n}  </title>
  <published>2024-0{n}-01T10:00:00+00:00</published>
  <media:group>
    <media:thumbnail url="https://i1.ytimg.com/vi/vid{n}/hqdefault.jpg" width="480" height="360"/>
    <media:description>
      Description {n}
    </media:description>
  </media:group>
</entry>"#
        )
    }

    fn feed_with(count: usize) -> String {
        let entries: Vec<String> = (1..=count).map(feed_entry_xml).collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns:yt="http://www.youtube.com/xml/schemas/2015" xmlns:media="http://search.yahoo.com/mrss/" xmlns="http://www.w3.org/2005/Atom">
 <title>Channel</title>
{}
</feed>"#,
            entries.join("\n")
        )
    }

    #[test]
    fn test_five_entries_yield_three_in_order() {
        let entries = parse_entries(&feed_with(5), DEFAULT_ENTRY_LIMIT, THUMB_TEMPLATE);

        assert_eq!(entries.len(), 3);
        for (i, entry) in entries.iter().enumerate() {
            let n = i + 1;
            assert_eq!(entry.video_id, format!("vid{}", n));
            assert_eq!(entry.title, format!("Video {}", n));
            assert_eq!(entry.description, format!("Description {}", n));
            assert_eq!(entry.published_at, format!("2024-0{}-01T10:00:00+00:00", n));
            assert_eq!(
                entry.thumbnail_url,
                format!("https://i1.ytimg.com/vi/vid{}/hqdefault.jpg", n)
            );
        }
    }

    #[test]
    fn test_fewer_entries_than_limit() {
        assert_eq!(parse_entries(&feed_with(2), 3, THUMB_TEMPLATE).len(), 2);
        assert!(parse_entries(&feed_with(0), 3, THUMB_TEMPLATE).is_empty());
    }

    #[test]
    fn test_zero_limit_yields_nothing() {
        assert!(parse_entries(&feed_with(5), 0, THUMB_TEMPLATE).is_empty());
    }

    #[test]
    fn test_limit_is_honoured_beyond_usual_feed_size() {
        let entries = parse_entries(&feed_with(20), 20, THUMB_TEMPLATE);
        assert_eq!(entries.len(), 20);
        assert_eq!(entries[19].title, "Video 20");

        assert_eq!(parse_entries(&feed_with(5), 100, THUMB_TEMPLATE).len(), 5);
    }

    #[test]
    fn test_missing_fields_degrade_per_field() {
        let xml = "<feed><entry><id>yt:video:onlyid</id></entry><entry><title>No id</title></entry></feed>";
        let entries = parse_entries(xml, 3, THUMB_TEMPLATE);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].video_id, "onlyid");
        assert_eq!(entries[0].title, "");
        assert_eq!(entries[0].published_at, "");
        assert_eq!(entries[0].description, "");
        assert_eq!(
            entries[0].thumbnail_url,
            "https://img.youtube.com/vi/onlyid/hqdefault.jpg"
        );

        assert_eq!(entries[1].video_id, "");
        assert_eq!(entries[1].title, "No id");
        assert_eq!(entries[1].thumbnail_url, "");
    }

    #[tokio::test]
    async fn test_fetch_latest_entries_uses_feed_template() {
        let fetcher = RecordingFetcher::new().respond(
            "https://feeds.example/videos.xml?channel_id=UCabc",
            200,
            &feed_with(4),
        );
        let extractor = FeedExtractor::new(fetcher.clone(), FEED_TEMPLATE, THUMB_TEMPLATE);

        let entries = extractor
            .fetch_latest_entries(&ChannelId::parse("UCabc").unwrap(), DEFAULT_ENTRY_LIMIT)
            .await
            .unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_non_success_feed_is_error_with_body() {
        let fetcher = RecordingFetcher::new().respond(
            "https://feeds.example/videos.xml?channel_id=UCabc",
            503,
            "Service Unavailable",
        );
        let extractor = FeedExtractor::new(fetcher, FEED_TEMPLATE, THUMB_TEMPLATE);

        let result = extractor
            .fetch_latest_entries(&ChannelId::parse("UCabc").unwrap(), 3)
            .await;

        match result {
            Err(FeedError::FeedUnavailable { status, detail }) => {
                assert_eq!(status, Some(503));
                assert_eq!(detail, "Service Unavailable");
            }
            other => panic!("expected FeedUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_error() {
        let extractor = FeedExtractor::new(RecordingFetcher::new(), FEED_TEMPLATE, THUMB_TEMPLATE);

        let result = extractor
            .fetch_latest_entries(&ChannelId::parse("UCabc").unwrap(), 3)
            .await;

        assert!(matches!(
            result,
            Err(FeedError::FeedUnavailable { status: None, .. })
        ));
    }
}
