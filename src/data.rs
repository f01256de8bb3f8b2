use std::sync::Arc;

use crate::resolver::{Resolution, Resolver, Source};

pub trait VideoService: Send + Sync {
    fn load_videos(&self) -> Resolution;
}

pub struct FeedVideoService {
    resolver: Arc<Resolver>,
    channel_id: String,
}

impl FeedVideoService {
    pub fn new(resolver: Arc<Resolver>, channel_id: impl Into<String>) -> Self {
        Self {
            resolver,
            channel_id: channel_id.into(),
        }
    }
}

impl VideoService for FeedVideoService {
    fn load_videos(&self) -> Resolution {
        self.resolver.resolve(&self.channel_id)
    }
}

/// Serves the fallback list without any network access.
pub struct OfflineVideoService {
    resolver: Arc<Resolver>,
}

impl OfflineVideoService {
    pub fn new(resolver: Arc<Resolver>) -> Self {
        Self { resolver }
    }
}

impl VideoService for OfflineVideoService {
    fn load_videos(&self) -> Resolution {
        Resolution {
            videos: self
                .resolver
                .fallback_videos(chrono::Utc::now().timestamp()),
            source: Source::Fallback,
        }
    }
}
