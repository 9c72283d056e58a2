//! One shared [`SourceFetcher`] per resolved endpoint.

use std::collections::HashMap;
use std::fmt;

use tracing::info;
use url::Url;

use crate::error::FeedError;
use crate::fetcher::{Scheduler, SourceFetcher, SourceSettings};
use crate::item::Item;
use crate::source::FetchRequest;

/// Endpoint template for MusicButler release feeds.
pub const DEFAULT_FEED_URL_TEMPLATE: &str = "https://www.musicbutler.io/users/feeds/{token}/";

/// Placeholder in a feed URL template replaced by the consumer's token.
pub const TOKEN_PLACEHOLDER: &str = "{token}";

/// Interpolate `token` into `template` and validate the result.
pub fn resolve_endpoint(template: &str, token: &str) -> Result<String, FeedError> {
    let candidate = template.replace(TOKEN_PLACEHOLDER, token);
    let malformed = |reason: String| FeedError::MalformedEndpoint {
        url: candidate.clone(),
        reason,
    };

    let url = Url::parse(&candidate).map_err(|e| malformed(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(malformed(format!("unsupported scheme {}", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(malformed("missing host".to_string()));
    }
    Ok(url.into())
}

/// What a source registration asks of the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRequest {
    pub url_template: String,
    pub token: String,
    pub settings: SourceSettings,
}

/// Outcome of [`SourceRegistry::get_or_create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Resolved endpoint, which is also the source's identity.
    pub source_id: String,
    /// Whether a new fetcher was created.
    pub created: bool,
    /// First fetch for a newly created fetcher, to be dispatched by the caller.
    pub request: Option<FetchRequest>,
}

/// Maps resolved endpoints to their fetchers.
///
/// Every fetcher the registry creates is passed to the wiring hook once so
/// the owner can attach its observers.
pub struct SourceRegistry {
    fetchers: HashMap<String, SourceFetcher>,
    wire: Box<dyn Fn(&mut SourceFetcher) + Send>,
}

impl fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("fetchers", &self.fetchers)
            .finish_non_exhaustive()
    }
}

impl SourceRegistry {
    pub fn new(wire: impl Fn(&mut SourceFetcher) + Send + 'static) -> Self {
        Self {
            fetchers: HashMap::new(),
            wire: Box::new(wire),
        }
    }

    /// Create the fetcher for this endpoint, or reuse the existing one.
    ///
    /// A new fetcher starts its first cycle immediately; the returned
    /// [`Registration::request`] must be dispatched.  An existing fetcher
    /// only ever has its interval shortened, and replays its known items so
    /// the new consumer does not wait for the next fetch.
    pub fn get_or_create(
        &mut self,
        source: SourceRequest,
        scheduler: &mut dyn Scheduler,
    ) -> Result<Registration, FeedError> {
        let url = resolve_endpoint(&source.url_template, &source.token)?;

        if let Some(fetcher) = self.fetchers.get_mut(&url) {
            info!(source = %url, "Use existing fetcher");
            fetcher.set_reload_interval(source.settings.reload_interval, scheduler);
            fetcher.broadcast_current_items();
            return Ok(Registration {
                source_id: url,
                created: false,
                request: None,
            });
        }

        let mut fetcher = SourceFetcher::new(SourceSettings {
            url: url.clone(),
            ..source.settings
        });
        info!(
            source = %url,
            interval_ms = fetcher.reload_interval().as_millis() as u64,
            "Create new fetcher"
        );
        (self.wire)(&mut fetcher);
        let request = fetcher.start_fetch(scheduler);
        self.fetchers.insert(url.clone(), fetcher);

        Ok(Registration {
            source_id: url,
            created: true,
            request,
        })
    }

    pub fn get(&self, source_id: &str) -> Option<&SourceFetcher> {
        self.fetchers.get(source_id)
    }

    pub fn get_mut(&mut self, source_id: &str) -> Option<&mut SourceFetcher> {
        self.fetchers.get_mut(source_id)
    }

    /// Current known items of each listed source, skipping unknown ids.
    pub fn batches<'a>(&'a self, source_ids: &[String]) -> Vec<&'a [Item]> {
        source_ids
            .iter()
            .filter_map(|id| self.fetchers.get(id))
            .map(SourceFetcher::items)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fetchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fetchers.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
