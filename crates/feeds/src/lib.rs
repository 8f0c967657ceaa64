//! Deskglance Feeds Crate
//!
//! Reference-data resolution and tiered quote fetching for the Deskglance
//! desktop widget. The UI layers (window chrome, settings, plugins) sit on
//! top of this crate; they pass configuration in and consume JSON-shaped
//! results, nothing more.
//!
//! # Overview
//!
//! Two independent services: lazy shared state with deterministic queries,
//! and tiered network fetches with normalization.
//!
//! - [`RegionResolver`] loads a keyed place-name dataset once, then answers
//!   fuzzy `(province, city, district)` lookups with a scoring-based
//!   disambiguation policy.
//! - [`TickerFeed`] fetches a live crypto ticker from a fast direct
//!   upstream and degrades to a relay endpoint when that fails, normalizing
//!   both into one canonical payload.
//!
//! # Architecture
//!
//! ```text
//! +-----------+     +----------------+     +----------------+
//! | UI plugin | --> | RegionResolver | --> | RegionDataset  |  (Arc snapshot)
//! +-----------+     +----------------+     +----------------+
//!
//! +-----------+     +------------+     +----------------+
//! | UI plugin | --> | TickerFeed | --> | QuoteUpstream  |  (direct, relay)
//! +-----------+     +------------+     +----------------+
//! ```
//!
//! # Core Types
//!
//! - [`RegionMatch`] - the `{code,name,province}` result of a lookup
//! - [`TickerQuote`] - the canonical ticker record with its `source` tag
//! - [`ResolveError`] / [`FetchError`] - typed failures, distinguishing
//!   "retry later" from "this input will never match"

pub mod errors;
pub mod models;
pub mod region;
pub mod ticker;

mod http;

pub use errors::{FetchError, ResolveError, TierError};
pub use models::{Candidate, QuoteSource, RegionMatch, TickerQuote};
pub use region::{LoadHealth, RegionDataset, RegionResolver, ResolverConfig, StringInterner};
pub use ticker::{DirectUpstream, FeedConfig, QuoteUpstream, RelayUpstream, TickerFeed};
