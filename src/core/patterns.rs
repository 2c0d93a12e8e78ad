//! Tolerant text extraction over channel pages and feed documents.
//!
//! Nothing here builds a DOM or validates XML. Each function scans for one
//! pattern and reports `None` (or an empty string) when it is absent, so a
//! missing field never takes its neighbours down with it.

use crate::domain::model::ChannelId;
use once_cell::sync::Lazy;
use regex::Regex;

// Ids are ASCII. In a URL the id must end at a path, query or fragment boundary.
static CHANNEL_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)/channel/(UC[A-Za-z0-9_-]+)(?:[/?#&]|$)").expect("valid channel path regex")
});

static EMBEDDED_CHANNEL_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""channelId"\s*:\s*"(UC[A-Za-z0-9_-]+)""#).expect("valid channelId regex")
});

static EMBEDDED_EXTERNAL_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""externalId"\s*:\s*"(UC[A-Za-z0-9_-]+)""#).expect("valid externalId regex")
});

static CANONICAL_CHANNEL_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"href="https?://(?:www\.|m\.)?youtube\.com/channel/(UC[A-Za-z0-9_-]+)""#)
        .expect("valid canonical link regex")
});

static ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<entry(?:\s[^>]*)?>.*?</entry>").expect("valid entry regex")
});

static VIDEO_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<yt:videoId>([^<]+)</yt:videoId>").expect("valid videoId regex")
});

static COMPOSITE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"yt:video:([^<]+)</id>").expect("valid composite id regex"));

static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<title>(.*?)</title>").expect("valid title regex"));

static PUBLISHED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<published>([^<]+)</published>").expect("valid published regex"));

static THUMBNAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<media:thumbnail[^>]*\burl="([^"]+)""#).expect("valid thumbnail regex")
});

static DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<media:description>(.*?)</media:description>")
        .expect("valid description regex")
});

fn first_capture<'a>(regex: &Regex, text: &'a str) -> Option<&'a str> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

/// First match that is a well-formed id; malformed earlier matches are skipped.
fn first_channel_id(regex: &Regex, text: &str) -> Option<ChannelId> {
    regex
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .find_map(|m| ChannelId::parse(m.as_str()))
}

// Channel pages

/// `/channel/UC…` anywhere in the URL; the path segment match is case-insensitive.
pub fn channel_id_from_url(url: &str) -> Option<ChannelId> {
    first_channel_id(&CHANNEL_PATH, url)
}

/// `"channelId":"UC…"` from the page's script-embedded JSON.
pub fn embedded_channel_id(html: &str) -> Option<ChannelId> {
    first_channel_id(&EMBEDDED_CHANNEL_ID, html)
}

/// `"externalId":"UC…"`, an alias the page metadata uses for the same id.
pub fn embedded_external_id(html: &str) -> Option<ChannelId> {
    first_channel_id(&EMBEDDED_EXTERNAL_ID, html)
}

/// `href="https://www.youtube.com/channel/UC…"`, as found on the canonical link.
pub fn canonical_link_channel_id(html: &str) -> Option<ChannelId> {
    first_channel_id(&CANONICAL_CHANNEL_LINK, html)
}

// Feed documents

/// Up to `limit` `<entry>` fragments, in document order.
pub fn entry_fragments(xml: &str, limit: usize) -> Vec<&str> {
    ENTRY.find_iter(xml).take(limit).map(|m| m.as_str()).collect()
}

/// Dedicated `<yt:videoId>` first, then the tail of `<id>yt:video:…</id>`.
pub fn video_id(entry: &str) -> String {
    first_capture(&VIDEO_ID, entry)
        .or_else(|| first_capture(&COMPOSITE_ID, entry))
        .map(|id| id.trim().to_string())
        .unwrap_or_default()
}

pub fn title(entry: &str) -> String {
    first_capture(&TITLE, entry)
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}

/// Taken verbatim; the feed's timestamp format is passed through untouched.
pub fn published_at(entry: &str) -> String {
    first_capture(&PUBLISHED, entry)
        .map(str::to_string)
        .unwrap_or_default()
}

pub fn media_thumbnail(entry: &str) -> Option<String> {
    first_capture(&THUMBNAIL, entry).map(str::to_string)
}

pub fn media_description(entry: &str) -> String {
    first_capture(&DESCRIPTION, entry)
        .map(|d| d.trim().to_string())
        .unwrap_or_default()
}

/// Conventional per-video image URL. Empty when there is no video id to embed.
pub fn synthesized_thumbnail(template: &str, video_id: &str) -> String {
    if video_id.is_empty() {
        return String::new();
    }
    template.replace("{video_id}", video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const THUMB_TEMPLATE: &str = "https://img.youtube.com/vi/{video_id}/hqdefault.jpg";

    fn id(raw: &str) -> Option<String> {
        Some(raw.to_string())
    }

    #[test]
    fn test_channel_id_from_url() {
        assert_eq!(
            channel_id_from_url("https://www.youtube.com/channel/UCabc123XYZ").map(|c| c.to_string()),
            id("UCabc123XYZ")
        );
        assert_eq!(
            channel_id_from_url("https://platform.example/CHANNEL/UCab-c_1/videos")
                .map(|c| c.to_string()),
            id("UCab-c_1")
        );
        assert!(channel_id_from_url("https://www.youtube.com/@somehandle").is_none());
        assert!(channel_id_from_url("https://www.youtube.com/channel/notanid").is_none());
    }

    #[test]
    fn test_embedded_ids() {
        let html = r#"<script>var ytInitialData = {"metadata":{"externalId":"UCext","channelId":"UCprimary"}};</script>"#;
        assert_eq!(embedded_channel_id(html).map(|c| c.to_string()), id("UCprimary"));
        assert_eq!(embedded_external_id(html).map(|c| c.to_string()), id("UCext"));
        assert!(embedded_channel_id(r#""channelId":"""#).is_none());
        assert!(embedded_channel_id(r#""channelId":"XYZ""#).is_none());
    }

    #[test]
    fn test_non_ascii_id_is_skipped_for_later_valid_one() {
        let html = r#"{"channelId":"UCabcé"} ... {"channelId":"UCgood"}"#;
        assert_eq!(embedded_channel_id(html).map(|c| c.to_string()), id("UCgood"));

        let html = r#"{"externalId":"UCxé"},{"externalId":"UCext2"}"#;
        assert_eq!(embedded_external_id(html).map(|c| c.to_string()), id("UCext2"));

        assert!(channel_id_from_url("https://www.youtube.com/channel/UCabcé").is_none());
        assert_eq!(
            channel_id_from_url("https://www.youtube.com/channel/UCé/x?c=/channel/UCok")
                .map(|c| c.to_string()),
            id("UCok")
        );
    }

    #[test]
    fn test_canonical_link_channel_id() {
        let html = r#"<link rel="canonical" href="https://www.youtube.com/channel/UCcanon-1">"#;
        assert_eq!(canonical_link_channel_id(html).map(|c| c.to_string()), id("UCcanon-1"));
        assert!(canonical_link_channel_id(r#"<link rel="canonical" href="https://www.youtube.com/@x">"#).is_none());
    }

    #[test]
    fn test_entry_fragments_respect_limit_and_order() {
        let xml = "<feed><entry><title>a</title></entry>\n<entry><title>b</title></entry><entry><title>c</title></entry></feed>";
        let fragments = entry_fragments(xml, 2);
        assert_eq!(fragments.len(), 2);
        assert_eq!(title(fragments[0]), "a");
        assert_eq!(title(fragments[1]), "b");
        assert!(entry_fragments("<feed></feed>", 3).is_empty());
        assert!(entry_fragments(xml, 0).is_empty());
    }

    #[test]
    fn test_entry_fragments_ignore_entry_like_tags() {
        let xml = "<entryset/><entry xml:lang=\"en\"><title>x</title></entry>";
        let fragments = entry_fragments(xml, 3);
        assert_eq!(fragments.len(), 1);
        assert_eq!(title(fragments[0]), "x");
    }

    #[test]
    fn test_video_id_prefers_dedicated_field() {
        let entry = "<entry><id>yt:video:fromcomposite</id><yt:videoId>dedicated</yt:videoId></entry>";
        assert_eq!(video_id(entry), "dedicated");

        let entry = "<entry><id>yt:video:fromcomposite</id></entry>";
        assert_eq!(video_id(entry), "fromcomposite");

        assert_eq!(video_id("<entry></entry>"), "");
    }

    #[test]
    fn test_text_fields_trimmed() {
        let entry = "<entry><title>\n   Hello world  \n</title><media:group><media:description>  line one\nline two  </media:description></media:group></entry>";
        assert_eq!(title(entry), "Hello world");
        assert_eq!(media_description(entry), "line one\nline two");
        assert_eq!(media_description("<entry></entry>"), "");
    }

    #[test]
    fn test_published_is_verbatim() {
        let entry = "<entry><published>2024-05-01T12:30:00+00:00</published></entry>";
        assert_eq!(published_at(entry), "2024-05-01T12:30:00+00:00");
        assert_eq!(published_at("<entry></entry>"), "");
    }

    #[test]
    fn test_media_thumbnail() {
        let entry = r#"<media:thumbnail url="https://i1.ytimg.com/vi/abc/hqdefault.jpg" width="480" height="360"/>"#;
        assert_eq!(
            media_thumbnail(entry).as_deref(),
            Some("https://i1.ytimg.com/vi/abc/hqdefault.jpg")
        );
        let entry = r#"<MEDIA:THUMBNAIL width="480" URL="https://x/y.jpg"/>"#;
        assert_eq!(media_thumbnail(entry).as_deref(), Some("https://x/y.jpg"));
        assert!(media_thumbnail("<entry></entry>").is_none());
    }

    #[test]
    fn test_synthesized_thumbnail_embeds_video_id() {
        assert_eq!(
            synthesized_thumbnail(THUMB_TEMPLATE, "dQw4w9WgXcQ"),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );
        assert_eq!(synthesized_thumbnail(THUMB_TEMPLATE, ""), "");
    }
}
