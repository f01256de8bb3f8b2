use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THUMBNAIL_TEMPLATE: &str = "https://i.ytimg.com/vi/{video_id}/hqdefault.jpg";
pub const VIDEO_ID_PLACEHOLDER: &str = "{video_id}";
pub const WATCH_URL: &str = "https://www.youtube.com/watch";
pub const EMBED_URL: &str = "https://www.youtube.com/embed";

const UNTITLED: &str = "Untitled video";

static CHANNEL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^:]+:\s*").expect("channel prefix pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEntry {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    /// Unix seconds; 0 when the feed carried no usable date.
    pub uploaded_at: i64,
}

impl VideoEntry {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        uploaded_at: i64,
        thumbnail_template: &str,
    ) -> Self {
        let id = id.into();
        Self {
            thumbnail_url: thumbnail_url(thumbnail_template, &id),
            id,
            title: title.into(),
            uploaded_at,
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    pub fn watch_url(&self) -> String {
        format!("{}?v={}", WATCH_URL, self.id)
    }

    pub fn embed_url(&self) -> String {
        format!("{}/{}", EMBED_URL, self.id)
    }
}

pub fn thumbnail_url(template: &str, video_id: &str) -> String {
    template.replace(VIDEO_ID_PLACEHOLDER, video_id)
}

/// Newest first. Stable, so entries sharing a timestamp keep their feed order.
pub fn sort_newest_first(videos: &mut [VideoEntry]) {
    videos.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
}

/// Feed titles sometimes arrive as `"Channel: Title"`; keep only the title.
pub fn strip_channel_prefix(title: &str) -> &str {
    match CHANNEL_PREFIX.find(title) {
        Some(found) => &title[found.end()..],
        None => title,
    }
}
