//! Collaborator seams: how bytes reach the core and how they become records.
//!
//! The synchronization core never talks to the network or to an XML library
//! directly.  It goes through three collaborators:
//!
//! * [`Transport`] — fetches the raw bytes of a feed ([`HttpTransport`] in
//!   production).
//! * [`decode_body`] — turns those bytes into text per the source's
//!   configured encoding.
//! * [`RecordParser`] — turns the text into [`RawRecord`]s ([`RssParser`] in
//!   production).
//!
//! ## For contributors — adding a new feed format
//!
//! 1. Create a new file in this directory (e.g. `atom.rs`).
//! 2. Define a struct and implement [`RecordParser`] for it, filling in
//!    whichever [`RawRecord`] fields the format provides.
//! 3. Add `mod atom;` below and re-export your struct in the `pub use` block.
//! 4. Hand an instance to [`crate::poll::spawn`] in `main.rs`.
//!
//! Normalization, de-duplication and scheduling are all format-agnostic.

mod http;
mod raw_record;
mod rss;

pub use http::HttpTransport;
pub use raw_record::RawRecord;
pub use self::rss::RssParser;

use std::future::Future;

use encoding_rs::{Encoding, UTF_8};
use tracing::warn;

use crate::error::{FeedError, TransportError};

/// Encoding assumed when a consumer does not configure one.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// A single request handed to the [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
}

impl FetchRequest {
    /// Build a request carrying the cache-busting headers every poll sends.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: vec![
                (
                    "User-Agent",
                    format!("Mozilla/5.0 (release-feed {})", env!("CARGO_PKG_VERSION")),
                ),
                (
                    "Cache-Control",
                    "max-age=0, no-cache, no-store, must-revalidate".to_string(),
                ),
                ("Pragma", "no-cache".to_string()),
            ],
        }
    }
}

/// Fetches feed bodies.
///
/// The event loop spawns each fetch as its own task, so implementations
/// must be shareable across tasks.
pub trait Transport: Send + Sync + 'static {
    /// Fetch the body at `request.url`.
    ///
    /// Any failure, including a non-success status, is reported as a
    /// classified [`TransportError`].
    fn fetch(
        &self,
        request: FetchRequest,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// Turns a decoded feed document into raw records.
///
/// Implementations are synchronous and produce the whole batch eagerly; an
/// `Err` means the document as a whole could not be understood.
pub trait RecordParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<Vec<RawRecord>, FeedError>;
}

/// Decode `bytes` using the encoding called `label`.
///
/// A byte-order mark overrides the label.  Unknown labels fall back to
/// UTF-8, and malformed sequences become U+FFFD rather than an error.
pub fn decode_body(bytes: &[u8], label: &str) -> String {
    let encoding = Encoding::for_label(label.trim().as_bytes()).unwrap_or_else(|| {
        warn!(encoding = %label, "unknown encoding, decoding as UTF-8");
        UTF_8
    });
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(encoding = %encoding.name(), "feed body contained malformed sequences");
    }
    text.into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
