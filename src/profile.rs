use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::video::VideoEntry;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Everything the site says about the creator. Read-only once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_channel_id")]
    pub channel_id: String,
    #[serde(default = "default_channel_url")]
    pub channel_url: String,
    #[serde(default = "default_handle")]
    pub handle: String,
    #[serde(default = "default_about")]
    pub about: String,
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
    #[serde(default = "default_socials")]
    pub socials: Vec<SocialLink>,
    #[serde(default = "default_fallback")]
    pub fallback: Vec<FallbackVideo>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: default_name(),
            channel_id: default_channel_id(),
            channel_url: default_channel_url(),
            handle: default_handle(),
            about: default_about(),
            contact_email: default_contact_email(),
            socials: default_socials(),
            fallback: default_fallback(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialLink {
    pub name: String,
    pub href: String,
    pub handle: String,
}

impl SocialLink {
    fn new(name: &str, href: &str, handle: &str) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
            handle: handle.into(),
        }
    }
}

/// A stand-in video shown when no live feed could be read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FallbackVideo {
    pub id: String,
    pub title: String,
    /// How long before the moment of resolution this video counts as uploaded.
    #[serde(default, with = "humantime_serde")]
    pub age: Duration,
}

impl FallbackVideo {
    fn new(id: &str, title: &str, age: Duration) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            age,
        }
    }

    pub fn to_entry(&self, now: i64, thumbnail_template: &str) -> VideoEntry {
        let age = i64::try_from(self.age.as_secs()).unwrap_or(i64::MAX);
        VideoEntry::new(
            self.id.clone(),
            self.title.clone(),
            now.saturating_sub(age),
            thumbnail_template,
        )
    }
}

fn default_name() -> String {
    "kozukid".into()
}

fn default_channel_id() -> String {
    "UCG16HCK-V0cRXNVYGcJD7gw".into()
}

fn default_channel_url() -> String {
    "https://www.youtube.com/@kozukidyt".into()
}

fn default_handle() -> String {
    "@kozukidyt".into()
}

fn default_about() -> String {
    "PEACE WAS NEVER AN OPTION\n\
     My name is Kozukid and I'm an NYC based content creator/filmmaker.\n\
     I'm also a biochemistry undergraduate. If there is an asian spiderman variant out there, thats me"
        .into()
}

fn default_contact_email() -> String {
    "thekozukid@gmail.com".into()
}

fn default_socials() -> Vec<SocialLink> {
    vec![
        SocialLink::new("YouTube", "https://www.youtube.com/@kozukidyt", "@kozukidyt"),
        SocialLink::new("Instagram", "https://www.instagram.com/thekozukid", "@thekozukid"),
        SocialLink::new("X (Twitter)", "https://x.com/thekozukid", "@thekozukid"),
        SocialLink::new("TikTok", "https://www.tiktok.com/@thekozukid", "@thekozukid"),
    ]
}

pub fn default_fallback() -> Vec<FallbackVideo> {
    vec![
        FallbackVideo::new(
            "dQw4w9WgXcQ",
            "Latest Video - Check YouTube for Updates",
            Duration::ZERO,
        ),
        FallbackVideo::new("9bZkp7q19f0", "Recent Upload - Visit Channel", DAY),
        FallbackVideo::new(
            "jNQXAC9IVRw",
            "Content Update - Subscribe for More",
            DAY * 2,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::DEFAULT_THUMBNAIL_TEMPLATE;

    #[test]
    fn fallback_entries_count_back_from_now() {
        let entries: Vec<VideoEntry> = default_fallback()
            .iter()
            .map(|video| video.to_entry(1_000_000, DEFAULT_THUMBNAIL_TEMPLATE))
            .collect();
        let uploaded: Vec<i64> = entries.iter().map(|v| v.uploaded_at).collect();
        assert_eq!(uploaded, [1_000_000, 913_600, 827_200]);
        assert_eq!(
            entries[1].thumbnail_url,
            "https://i.ytimg.com/vi/9bZkp7q19f0/hqdefault.jpg"
        );
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let profile: Profile = serde_yaml::from_str("channel_id: UCabc\n").unwrap();
        assert_eq!(profile.channel_id, "UCabc");
        assert_eq!(profile.contact_email, "thekozukid@gmail.com");
        assert_eq!(profile.socials.len(), 4);
        assert_eq!(profile.fallback.len(), 3);
    }

    #[test]
    fn fallback_age_reads_humantime() {
        let video: FallbackVideo =
            serde_yaml::from_str("id: abc\ntitle: Old upload\nage: 3days\n").unwrap();
        assert_eq!(video.age, DAY * 3);
    }
}
