//! Consumer configuration from the command line or a JSON file.
//!
//! JSON keys use the same camelCase option names as the display module
//! (`feedToken`, `reloadInterval`, `maxNewsItems`, ...).  Omitted keys take
//! the defaults below.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser};
use serde::Deserialize;

use crate::aggregate::FilterPolicy;
use crate::fetcher::SourceSettings;
use crate::item::DEFAULT_ARTWORK_SIZE;
use crate::registry::{SourceRequest, DEFAULT_FEED_URL_TEMPLATE};
use crate::source::DEFAULT_ENCODING;

pub const DEFAULT_RELOAD_INTERVAL_MS: u64 = 60 * 60 * 1000;
pub const DEFAULT_MAX_AGE_MS: u64 = 7 * 24 * 60 * 60 * 1000;

#[derive(Debug, Parser)]
#[command(
    name = "release-feed",
    version,
    about = "Poll MusicButler release feeds and print new releases as they appear"
)]
pub struct Cli {
    /// JSON file holding an array of consumer configurations.
    ///
    /// When given, the per-consumer flags below are ignored.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub consumer: ConsumerConfig,
}

/// Everything one consumer can configure.
#[derive(Debug, Clone, PartialEq, Eq, Args, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsumerConfig {
    /// Label used in logs and events.
    #[arg(long)]
    pub name: Option<String>,

    /// Private token of the MusicButler feed.
    #[arg(long, default_value = "")]
    pub feed_token: String,

    /// Feed URL with `{token}` where the token goes.
    #[arg(long, default_value = DEFAULT_FEED_URL_TEMPLATE)]
    pub feed_url_template: String,

    /// Character encoding of the feed body.
    #[arg(long, default_value = DEFAULT_ENCODING)]
    pub encoding: String,

    /// Milliseconds between fetches (minimum 1000).
    #[arg(long, default_value_t = DEFAULT_RELOAD_INTERVAL_MS)]
    pub reload_interval: u64,

    /// Edge length in pixels of the requested cover art.
    #[arg(long, default_value_t = DEFAULT_ARTWORK_SIZE)]
    pub album_art_size: u32,

    /// Maximum items to show; 0 shows everything.
    #[arg(long, default_value_t = 0)]
    pub max_news_items: usize,

    /// Hide releases older than `--ignore-older-than`.
    #[arg(long)]
    pub ignore_old_items: bool,

    /// Age cutoff in milliseconds.
    #[arg(long, default_value_t = DEFAULT_MAX_AGE_MS)]
    pub ignore_older_than: u64,

    /// Log every feed entry that could not be parsed.
    #[arg(long)]
    pub log_feed_warnings: bool,

    /// Emit update events for newly seen releases.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub broadcast_releases_updates: bool,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            name: None,
            feed_token: String::new(),
            feed_url_template: DEFAULT_FEED_URL_TEMPLATE.to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
            reload_interval: DEFAULT_RELOAD_INTERVAL_MS,
            album_art_size: DEFAULT_ARTWORK_SIZE,
            max_news_items: 0,
            ignore_old_items: false,
            ignore_older_than: DEFAULT_MAX_AGE_MS,
            log_feed_warnings: false,
            broadcast_releases_updates: true,
        }
    }
}

impl ConsumerConfig {
    /// The source this consumer asks the registry for.
    pub fn source_request(&self) -> SourceRequest {
        SourceRequest {
            url_template: self.feed_url_template.clone(),
            token: self.feed_token.clone(),
            settings: SourceSettings {
                url: String::new(),
                reload_interval: Duration::from_millis(self.reload_interval),
                encoding: self.encoding.clone(),
                log_rejections: self.log_feed_warnings,
                artwork_size: self.album_art_size,
            },
        }
    }

    pub fn filter_policy(&self) -> FilterPolicy {
        FilterPolicy {
            max_items: self.max_news_items,
            ignore_old_items: self.ignore_old_items,
            max_age_ms: self.ignore_older_than,
            broadcast_updates: self.broadcast_releases_updates,
        }
    }
}

/// Parse a JSON array of consumer configurations.
pub fn parse_consumers(json: &str) -> Result<Vec<ConsumerConfig>> {
    serde_json::from_str(json).context("invalid consumer configuration")
}

/// Read consumer configurations from a JSON file.
pub fn load_consumers(path: &Path) -> Result<Vec<ConsumerConfig>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_consumers(&json).with_context(|| format!("parsing {}", path.display()))
}

impl Cli {
    /// Consumers to register: the config file's, or the single one from flags.
    pub fn consumers(&self) -> Result<Vec<ConsumerConfig>> {
        match &self.config {
            Some(path) => load_consumers(path),
            None => Ok(vec![self.consumer.clone()]),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
