//! Live ticker fetching with tiered fallback.

mod feed;
mod models;

pub use feed::{DirectUpstream, FeedConfig, QuoteUpstream, RelayUpstream, TickerFeed};
