use crate::video::VideoEntry;

/// Entries listed on the home page before the first "load more".
pub const INITIAL_SHOW_COUNT: usize = 7;
pub const LOAD_MORE_STEP: usize = 6;

/// An already-fetched video list. Paging and search never touch the network.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    videos: Vec<VideoEntry>,
}

impl Catalog {
    pub fn new(videos: Vec<VideoEntry>) -> Self {
        Self { videos }
    }

    pub fn all(&self) -> &[VideoEntry] {
        &self.videos
    }

    pub fn latest(&self) -> Option<&VideoEntry> {
        self.videos.first()
    }

    /// Videos listed under the featured one: positions `1..show_count`.
    pub fn home_page(&self, show_count: usize) -> &[VideoEntry] {
        let end = show_count.min(self.videos.len());
        if end <= 1 {
            return &[];
        }
        &self.videos[1..end]
    }

    pub fn has_more(&self, show_count: usize) -> bool {
        show_count < self.videos.len()
    }

    pub fn next_show_count(show_count: usize) -> usize {
        show_count.saturating_add(LOAD_MORE_STEP)
    }

    /// Case-insensitive match on title or id. A blank query matches everything;
    /// otherwise the query is matched as typed, surrounding spaces included.
    pub fn search(&self, query: &str) -> Vec<&VideoEntry> {
        if query.trim().is_empty() {
            return self.videos.iter().collect();
        }
        let query = query.to_lowercase();
        self.videos
            .iter()
            .filter(|video| {
                video.title.to_lowercase().contains(&query)
                    || video.id.to_lowercase().contains(&query)
            })
            .collect()
    }
}
