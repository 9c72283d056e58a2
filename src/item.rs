//! The canonical release item and the normalizer that produces it.
//!
//! Every parser emits [`RawRecord`]s; [`normalize`] turns each one into an
//! [`Item`] or a [`Rejection`].  Rejections are ordinary values, so a bad
//! record never aborts the rest of a batch.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::source::RawRecord;

/// Word the release feed uses between artist and album ("X released Y").
pub const RELEASED_MARKER: &str = "released";

/// What [`RELEASED_MARKER`] is replaced with.
pub const RELEASED_REPLACEMENT: &str = "-";

/// Fixed-size token embedded in enclosure URLs by the feed.
pub const ARTWORK_SIZE_TOKEN: &str = "300x300bb";

/// Artwork size used when a consumer does not configure one.
pub const DEFAULT_ARTWORK_SIZE: u32 = 300;

/// A normalized release.
///
/// Two items are the same release when every field matches.  The feed gives
/// no stable identifier, so identical releases are indistinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    /// Cleaned-up display title.
    pub title: String,

    /// Publication timestamp, used for ordering and age filtering.
    pub published_at: DateTime<Utc>,

    /// Link to the release; may be empty.
    pub url: String,

    /// Cover art URL at the consumer's preferred size.
    pub artwork_url: String,
}

/// Comparator for newest-first ordering.
///
/// Only the publish time is compared so that a stable sort keeps the
/// original relative order of items published at the same instant.
pub fn newest_first(a: &Item, b: &Item) -> Ordering {
    b.published_at.cmp(&a.published_at)
}

/// Why a record could not become an [`Item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("title is empty after cleanup")]
    MissingTitle,

    #[error("no usable publish date")]
    MissingDate,

    #[error("no enclosure to derive artwork from")]
    MissingArtwork,
}

/// Convert a raw record into an [`Item`].
pub fn normalize(raw: &RawRecord, artwork_size: u32) -> Result<Item, Rejection> {
    let title = raw
        .title
        .as_deref()
        .map(clean_title)
        .filter(|t| !t.is_empty())
        .ok_or(Rejection::MissingTitle)?;

    let published_at = raw
        .date_fields()
        .into_iter()
        .flatten()
        .find_map(parse_timestamp)
        .ok_or(Rejection::MissingDate)?;

    let url = raw
        .link_fields()
        .into_iter()
        .flatten()
        .find(|l| !l.is_empty())
        .unwrap_or_default()
        .to_string();

    let artwork_url = raw
        .enclosure_url
        .as_deref()
        .filter(|u| !u.is_empty())
        .map(|u| artwork_for_size(u, artwork_size))
        .ok_or(Rejection::MissingArtwork)?;

    Ok(Item {
        title,
        published_at,
        url,
        artwork_url,
    })
}

fn clean_title(title: &str) -> String {
    title
        .replace(RELEASED_MARKER, RELEASED_REPLACEMENT)
        .replace('"', "")
        .trim()
        .to_string()
}

/// Swap the feed's fixed artwork size for `size`.
pub fn artwork_for_size(enclosure_url: &str, size: u32) -> String {
    enclosure_url.replace(ARTWORK_SIZE_TOKEN, &format!("{size}x{size}bb"))
}

/// Parse an RFC 2822 or RFC 3339 timestamp.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
