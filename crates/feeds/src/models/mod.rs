//! Canonical data types shared across the crate.

mod region;
mod ticker;

pub use region::{Candidate, RegionMatch};
pub use ticker::{QuoteSource, TickerQuote};
