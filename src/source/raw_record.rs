//! The unprocessed record a feed parser hands to the normalizer.
//!
//! `RawRecord` mirrors what a syntax parser can find in one feed entry
//! without interpreting any of it: several alternative date-bearing fields,
//! several alternative link-bearing fields, and an enclosure reference.
//! Deciding which of those wins is the normalizer's job
//! ([`crate::item::normalize`]), not the parser's.
//!
//! ## For contributors
//!
//! If you are adding a new parser you do **not** need to modify this file
//! unless the format carries a date or link under a name not listed here.
//! Fill in whichever fields the format provides and leave the rest `None`.

/// One feed entry exactly as the parser saw it.
///
/// Every field is optional because feeds in the wild omit any of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// Entry title, before cleanup.
    pub title: Option<String>,

    /// RSS `<pubDate>`.  Highest-priority date field.
    pub pub_date: Option<String>,

    /// Atom-style `published`.
    pub published: Option<String>,

    /// Atom-style `updated`.
    pub updated: Option<String>,

    /// Dublin Core `dc:date`.  Lowest-priority date field.
    pub dc_date: Option<String>,

    /// Explicit entry URL, preferred over [`link`](Self::link).
    pub url: Option<String>,

    /// `<link>` element.
    pub link: Option<String>,

    /// URL of the `<enclosure>`, which for release feeds is the cover art.
    pub enclosure_url: Option<String>,
}

impl RawRecord {
    /// Date-bearing fields in priority order.
    pub fn date_fields(&self) -> [Option<&str>; 4] {
        [
            self.pub_date.as_deref(),
            self.published.as_deref(),
            self.updated.as_deref(),
            self.dc_date.as_deref(),
        ]
    }

    /// Link-bearing fields in priority order.
    pub fn link_fields(&self) -> [Option<&str>; 2] {
        [self.url.as_deref(), self.link.as_deref()]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
