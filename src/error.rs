//! Error kinds surfaced by the synchronization core.
//!
//! Fetch-cycle failures are never fatal: a fetcher reports them to its
//! observers and reschedules.  Per-record problems are not errors at all at
//! this level; see [`crate::item::Rejection`].

use thiserror::Error;

/// Coarse classification of a network-layer failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("host unreachable: {0}")]
    Unreachable(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("unexpected HTTP status {0}")]
    BadStatus(u16),

    #[error("transport failure: {0}")]
    Other(String),
}

impl TransportError {
    /// Classify a non-success HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Unauthorized,
            other => Self::BadStatus(other),
        }
    }
}

/// Errors reported to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The resolved source URL failed validation; no fetcher was created.
    #[error("malformed feed url {url}: {reason}")]
    MalformedEndpoint { url: String, reason: String },

    #[error("could not fetch feed: {0}")]
    Transport(#[from] TransportError),

    /// The document could not be parsed as a feed at all.
    #[error("could not parse feed: {0}")]
    Parse(String),
}

impl FeedError {
    /// Message key the presentation layer localizes.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::MalformedEndpoint { .. } => "MODULE_ERROR_MALFORMED_URL",
            Self::Transport(TransportError::Timeout | TransportError::Unreachable(_)) => {
                "MODULE_ERROR_NO_CONNECTION"
            }
            Self::Transport(TransportError::Unauthorized) => "MODULE_ERROR_UNAUTHORIZED",
            Self::Transport(_) | Self::Parse(_) => "MODULE_ERROR_UNSPECIFIED",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
