//! release-feed — keeps music-release feeds in sync for any number of
//! display consumers.
//!
//! ## Architecture overview
//!
//! ```text
//!             ┌────────────┐ get_or_create ┌──────────────┐  RawRecord  ┌──────────┐
//!  Register ─►│  poll::Hub │ ────────────► │  registry    │ ──────────► │  item    │
//!             │ (one loop) │               │  └ fetcher   │ ◄────────── │normalize │
//!             └────────────┘               └──────────────┘    Item     └──────────┘
//!                   │ ItemsAvailable              ▲ FetchRequest / bytes
//!                   ▼                             │
//!             ┌────────────┐               ┌──────────────┐
//!             │ aggregate  │               │  source/     │
//!             │ (per view) │               │ http + rss   │
//!             └────────────┘               └──────────────┘
//!                   │ ConsumerEvent
//!                   ▼
//!               display
//! ```
//!
//! * **`source/`** — collaborator seams: transport, decoding, feed parser.
//! * **`item`** — the canonical [`Item`](item::Item) and the normalizer.
//! * **`fetcher`** — per-source fetch/parse/reschedule state machine.
//! * **`registry`** — one shared fetcher per resolved endpoint.
//! * **`aggregate`** — per-consumer merge, filter, cap and delta.
//! * **`poll`** — the event loop tying the above together.
//! * **`config`** — consumer options from flags or JSON.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod item;
pub mod poll;
pub mod registry;
pub mod source;

pub use aggregate::{Aggregation, ConsumerView, FilterPolicy};
pub use config::{Cli, ConsumerConfig};
pub use error::{FeedError, TransportError};
pub use fetcher::{FetchState, Scheduler, SourceFetcher, TimerId};
pub use item::{normalize, Item, Rejection};
pub use poll::{ConsumerEvent, Hub, HubHandle, LoopEvent};
pub use registry::SourceRegistry;
pub use source::{HttpTransport, RawRecord, RecordParser, RssParser, Transport};
