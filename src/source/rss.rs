//! RSS parser collaborator.
//!
//! Wraps the [`rss`] crate and lifts each `<item>` into a [`RawRecord`]
//! without judging its contents.  Use it as a template when adding support
//! for Atom, JSON Feed, or any other format.

use crate::error::FeedError;

use super::{RawRecord, RecordParser};

/// Parses RSS 2.0 documents using the [`rss`] crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RssParser;

impl RssParser {
    /// Lift every item of an already-parsed [`rss::Channel`] into a
    /// [`RawRecord`].
    ///
    /// This is a pure function (no I/O) so that tests can exercise the
    /// field mapping without a document round-trip.
    pub fn parse_channel(channel: &rss::Channel) -> Vec<RawRecord> {
        channel.items().iter().map(Self::parse_item).collect()
    }

    fn parse_item(item: &rss::Item) -> RawRecord {
        RawRecord {
            title: item.title().map(String::from),
            pub_date: item.pub_date().map(String::from),
            published: atom_value(item, "published"),
            updated: atom_value(item, "updated"),
            dc_date: item
                .dublin_core_ext()
                .and_then(|dc| dc.dates().first())
                .cloned(),
            url: item
                .guid()
                .filter(|guid| guid.is_permalink() && guid.value().starts_with("http"))
                .map(|guid| guid.value().to_string()),
            link: item.link().map(String::from),
            enclosure_url: item.enclosure().map(|e| e.url().to_string()),
        }
    }
}

/// Read `<atom:{name}>` from an item's extension map, if the feed declared it.
fn atom_value(item: &rss::Item, name: &str) -> Option<String> {
    item.extensions()
        .get("atom")
        .and_then(|elements| elements.get(name))
        .and_then(|values| values.first())
        .and_then(|ext| ext.value())
        .map(String::from)
}

impl RecordParser for RssParser {
    fn parse(&self, text: &str) -> Result<Vec<RawRecord>, FeedError> {
        let channel = rss::Channel::read_from(text.as_bytes())
            .map_err(|e| FeedError::Parse(e.to_string()))?;
        Ok(Self::parse_channel(&channel))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
