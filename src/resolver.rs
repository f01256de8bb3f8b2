//! Live video list for a channel, read through a chain of relay routes.
//!
//! Routes are tried strictly in order and the first one that yields at least
//! one video wins. Every failure stays inside this module: when no route
//! works the caller gets the configured fallback list instead of an error.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::feed::{parse_feed, FeedError};
use crate::fetch::Fetcher;
use crate::profile::{self, FallbackVideo};
use crate::route::{self, Route};
use crate::video::{self, VideoEntry, DEFAULT_THUMBNAIL_TEMPLATE};

pub const DEFAULT_FEED_URL_TEMPLATE: &str =
    "https://www.youtube.com/feeds/videos.xml?channel_id={channel_id}";
pub const CHANNEL_ID_PLACEHOLDER: &str = "{channel_id}";

#[derive(Debug, Clone, PartialEq)]
pub struct ResolverSettings {
    pub feed_url_template: String,
    pub thumbnail_template: String,
    pub routes: Vec<Route>,
    pub fallback: Vec<FallbackVideo>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            feed_url_template: DEFAULT_FEED_URL_TEMPLATE.to_string(),
            thumbnail_template: DEFAULT_THUMBNAIL_TEMPLATE.to_string(),
            routes: route::default_routes(),
            fallback: profile::default_fallback(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Live { route: String },
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub videos: Vec<VideoEntry>,
    pub source: Source,
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        self.source == Source::Fallback
    }
}

pub struct Resolver {
    settings: Arc<ResolverSettings>,
    fetcher: Arc<dyn Fetcher>,
}

impl Resolver {
    pub fn new(settings: ResolverSettings, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            settings: Arc::new(settings),
            fetcher,
        }
    }

    pub fn feed_url(&self, channel_id: &str) -> String {
        self.settings
            .feed_url_template
            .replace(CHANNEL_ID_PLACEHOLDER, channel_id)
    }

    /// The latest videos for `channel_id`, newest first. Never empty as long
    /// as a fallback list is configured.
    pub fn resolve_videos(&self, channel_id: &str) -> Vec<VideoEntry> {
        self.resolve(channel_id).videos
    }

    pub fn resolve(&self, channel_id: &str) -> Resolution {
        let feed_url = self.feed_url(channel_id);

        let live = self.settings.routes.iter().find_map(|route| {
            match self.attempt(route, &feed_url) {
                Ok(videos) => Some((route, videos)),
                Err(err) => {
                    warn!(route = %route.name, error = %err, "feed route failed");
                    None
                }
            }
        });

        match live {
            Some((route, videos)) if !videos.is_empty() => {
                info!(route = %route.name, count = videos.len(), "resolved channel feed");
                Resolution {
                    videos,
                    source: Source::Live {
                        route: route.name.clone(),
                    },
                }
            }
            Some((route, _)) => {
                warn!(
                    route = %route.name,
                    channel_id,
                    "feed entries carry no video ids; using fallback videos"
                );
                self.fallback()
            }
            None => {
                warn!(
                    channel_id,
                    routes = self.settings.routes.len(),
                    "no feed route succeeded; using fallback videos"
                );
                self.fallback()
            }
        }
    }

    fn fallback(&self) -> Resolution {
        Resolution {
            videos: self.fallback_videos(chrono::Utc::now().timestamp()),
            source: Source::Fallback,
        }
    }

    /// The configured fallback list, in configured order.
    pub fn fallback_videos(&self, now: i64) -> Vec<VideoEntry> {
        self.settings
            .fallback
            .iter()
            .map(|video| video.to_entry(now, &self.settings.thumbnail_template))
            .collect()
    }

    /// A route succeeds once its document holds at least one `<entry>`, even
    /// if none of them carries a video id.
    fn attempt(&self, route: &Route, feed_url: &str) -> Result<Vec<VideoEntry>, FeedError> {
        let url = route.request_url(feed_url);
        debug!(route = %route.name, %url, "fetching feed");

        let body = self.fetcher.get_text(&url).map_err(FeedError::Fetch)?;
        let document = route.unwrap_body(body)?;
        let parsed = parse_feed(&document, &self.settings.thumbnail_template)?;
        if parsed.entries == 0 {
            return Err(FeedError::Empty);
        }
        let mut videos = parsed.videos;
        video::sort_newest_first(&mut videos);
        Ok(videos)
    }
}
