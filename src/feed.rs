use chrono::DateTime;
use roxmltree::{Document, Node};

use crate::video::{strip_channel_prefix, VideoEntry};

/// Why a single route failed to produce videos.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("fetch failed: {0:#}")]
    Fetch(#[source] anyhow::Error),
    #[error("malformed {field:?} envelope: {source}")]
    Envelope {
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("envelope has no string field {0:?}")]
    MissingField(String),
    #[error("malformed feed document: {0}")]
    Document(#[from] roxmltree::Error),
    #[error("feed document has no entries")]
    Empty,
}

/// A parsed feed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFeed {
    /// Number of `<entry>` elements, including those without a video id.
    pub entries: usize,
    /// Entries that carried a video id, in document order.
    pub videos: Vec<VideoEntry>,
}

/// Parse an Atom video feed.
///
/// Elements are matched by local name so both `yt:videoId` and a bare
/// `videoId` are accepted. Entries without a video id are counted but skipped.
pub fn parse_feed(xml: &str, thumbnail_template: &str) -> Result<ParsedFeed, FeedError> {
    let doc = Document::parse(xml)?;
    let mut entries = 0;
    let videos = doc
        .descendants()
        .filter(|node| is_named(node, "entry"))
        .inspect(|_| entries += 1)
        .filter_map(|entry| parse_entry(entry, thumbnail_template))
        .collect();
    Ok(ParsedFeed { entries, videos })
}

fn parse_entry(entry: Node<'_, '_>, thumbnail_template: &str) -> Option<VideoEntry> {
    let id = child_text(entry, "videoId")?;
    let id = id.trim();
    if id.is_empty() {
        return None;
    }

    let title = child_text(entry, "title").unwrap_or_default();
    let uploaded_at = child_text(entry, "published")
        .map(|published| parse_timestamp(&published))
        .unwrap_or(0);

    Some(VideoEntry::new(
        id,
        strip_channel_prefix(&title),
        uploaded_at,
        thumbnail_template,
    ))
}

fn is_named(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn child_text(entry: Node<'_, '_>, name: &str) -> Option<String> {
    entry
        .descendants()
        .skip(1)
        .find(|node| is_named(node, name))
        .map(text_content)
}

fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Unix seconds for an RFC 3339 or RFC 2822 date, 0 otherwise.
pub fn parse_timestamp(raw: &str) -> i64 {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|parsed| parsed.timestamp())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::DEFAULT_THUMBNAIL_TEMPLATE;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns:yt="http://www.youtube.com/xml/schemas/2015" xmlns:media="http://search.yahoo.com/mrss/" xmlns="http://www.w3.org/2005/Atom">
 <title>kozukid</title>
 <entry>
  <id>yt:video:aaa111</id>
  <yt:videoId>aaa111</yt:videoId>
  <title>kozukid: subway run</title>
  <published>2024-03-01T12:00:00+00:00</published>
  <media:group><media:title>media title</media:title></media:group>
 </entry>
 <entry>
  <yt:videoId>bbb222</yt:videoId>
  <title>Untagged &amp; plain</title>
  <published>not a date</published>
 </entry>
 <entry>
  <title>no id here</title>
  <published>2024-03-02T12:00:00+00:00</published>
 </entry>
 <entry>
  <videoId>ccc333</videoId>
 </entry>
</feed>"#;

    #[test]
    fn parses_entries_in_document_order() {
        let parsed = parse_feed(FEED, DEFAULT_THUMBNAIL_TEMPLATE).unwrap();
        assert_eq!(parsed.entries, 4);
        let videos = parsed.videos;
        let ids: Vec<&str> = videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["aaa111", "bbb222", "ccc333"]);

        assert_eq!(videos[0].title, "subway run");
        assert_eq!(videos[0].uploaded_at, 1_709_294_400);
        assert_eq!(
            videos[0].thumbnail_url,
            "https://i.ytimg.com/vi/aaa111/hqdefault.jpg"
        );

        assert_eq!(videos[1].title, "Untagged & plain");
        assert_eq!(videos[1].uploaded_at, 0);

        assert_eq!(videos[2].title, "");
        assert_eq!(videos[2].uploaded_at, 0);
    }

    #[test]
    fn rejects_non_xml() {
        let err = parse_feed("<html><body>rate limited", DEFAULT_THUMBNAIL_TEMPLATE).unwrap_err();
        assert!(matches!(err, FeedError::Document(_)));

        let err = parse_feed("{\"contents\": null}", DEFAULT_THUMBNAIL_TEMPLATE).unwrap_err();
        assert!(matches!(err, FeedError::Document(_)));
    }

    #[test]
    fn well_formed_without_entries_is_empty() {
        let parsed = parse_feed("<feed><title>quiet</title></feed>", DEFAULT_THUMBNAIL_TEMPLATE)
            .unwrap();
        assert_eq!(parsed.entries, 0);
        assert!(parsed.videos.is_empty());
    }

    #[test]
    fn entries_without_ids_still_count() {
        let parsed = parse_feed(
            "<feed><entry><title>chan: no id</title></entry></feed>",
            DEFAULT_THUMBNAIL_TEMPLATE,
        )
        .unwrap();
        assert_eq!(parsed.entries, 1);
        assert!(parsed.videos.is_empty());
    }

    #[test]
    fn timestamps_accept_common_formats() {
        assert_eq!(parse_timestamp("1970-01-01T00:01:40Z"), 100);
        assert_eq!(parse_timestamp("Thu, 01 Jan 1970 00:08:20 +0000"), 500);
        assert_eq!(parse_timestamp(""), 0);
    }
}
