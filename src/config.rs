use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::fetch::DEFAULT_TIMEOUT;
use crate::profile::Profile;
use crate::resolver::{ResolverSettings, CHANNEL_ID_PLACEHOLDER, DEFAULT_FEED_URL_TEMPLATE};
use crate::route::{self, Route};
use crate::video::{DEFAULT_THUMBNAIL_TEMPLATE, VIDEO_ID_PLACEHOLDER};

const DEFAULT_ENV_PREFIX: &str = "CREATOR_FEED";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(default = "default_feed_url_template")]
    pub url_template: String,
    #[serde(default = "default_thumbnail_template")]
    pub thumbnail_template: String,
    #[serde(default = "route::default_routes")]
    pub routes: Vec<Route>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout: default_timeout(),
            url_template: default_feed_url_template(),
            thumbnail_template: default_thumbnail_template(),
            routes: route::default_routes(),
        }
    }
}

fn default_user_agent() -> String {
    format!("creator-feed/{}", crate::VERSION)
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_feed_url_template() -> String {
    DEFAULT_FEED_URL_TEMPLATE.into()
}

fn default_thumbnail_template() -> String {
    DEFAULT_THUMBNAIL_TEMPLATE.into()
}

impl Config {
    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            feed_url_template: self.feed.url_template.clone(),
            thumbnail_template: self.feed.thumbnail_template.clone(),
            routes: self.feed.routes.clone(),
            fallback: self.profile.fallback.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.profile.channel_id.trim().is_empty(),
            "config: profile.channel_id is required"
        );
        ensure!(
            !self.profile.fallback.is_empty(),
            "config: profile.fallback needs at least one video"
        );
        ensure!(
            self.profile.fallback.iter().all(|v| !v.id.trim().is_empty()),
            "config: profile.fallback entries need an id"
        );
        ensure!(
            self.profile
                .fallback
                .windows(2)
                .all(|pair| pair[0].age <= pair[1].age),
            "config: profile.fallback must be listed newest first (ages may not decrease)"
        );
        ensure!(
            self.feed.url_template.contains(CHANNEL_ID_PLACEHOLDER),
            "config: feed.url_template must contain {CHANNEL_ID_PLACEHOLDER}"
        );
        ensure!(
            self.feed.thumbnail_template.contains(VIDEO_ID_PLACEHOLDER),
            "config: feed.thumbnail_template must contain {VIDEO_ID_PLACEHOLDER}"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub config_file: Option<PathBuf>,
    pub env_prefix: Option<String>,
}

pub fn load(options: LoadOptions) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(path) = options.config_file.as_ref() {
        cfg = read_config_file(path)?;
    } else if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            cfg = read_config_file(&default_path)?;
        }
    }

    let prefix = options.env_prefix.as_deref().unwrap_or(DEFAULT_ENV_PREFIX);
    apply_env(&mut cfg, prefix);

    cfg.validate()?;
    Ok(cfg)
}

fn read_config_file(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&data)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
    Ok(config)
}

fn apply_env(cfg: &mut Config, prefix: &str) {
    let mut map: HashMap<String, String> = HashMap::new();
    let upper_prefix = format!("{}_", prefix.to_uppercase());

    for (key, value) in env::vars() {
        if let Some(stripped) = key.strip_prefix(&upper_prefix) {
            let normalized = stripped.to_ascii_lowercase().replace("__", ".");
            map.insert(normalized, value);
        }
    }

    for (key, value) in map {
        apply_env_value(cfg, &key, value);
    }
}

fn apply_env_value(cfg: &mut Config, key: &str, value: String) {
    match key {
        "profile.name" => cfg.profile.name = value,
        "profile.channel_id" => cfg.profile.channel_id = value,
        "profile.channel_url" => cfg.profile.channel_url = value,
        "profile.handle" => cfg.profile.handle = value,
        "profile.about" => cfg.profile.about = value,
        "profile.contact_email" => cfg.profile.contact_email = value,
        "feed.user_agent" => cfg.feed.user_agent = value,
        "feed.url_template" => cfg.feed.url_template = value,
        "feed.thumbnail_template" => cfg.feed.thumbnail_template = value,
        "feed.timeout" => {
            if let Ok(duration) = humantime::parse_duration(&value) {
                cfg.feed.timeout = duration;
            }
        }
        "feed.routes" => {
            // Comma separated raw relay prefixes, tried in the given order.
            let routes: Vec<Route> = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .enumerate()
                .map(|(i, prefix)| Route::raw(format!("env-{}", i + 1), prefix))
                .collect();
            if !routes.is_empty() {
                cfg.feed.routes = routes;
            }
        }
        _ => {}
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("creator-feed").join("config.yaml"))
}
