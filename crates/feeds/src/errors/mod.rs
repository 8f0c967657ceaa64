//! Error types for the feeds crate.
//!
//! Each concern carries its own enum so callers can tell "retry later"
//! apart from "this input will never match":
//! - [`ResolveError`]: region lookup failures
//! - [`TierError`]: failure of a single quote tier
//! - [`FetchError`]: terminal failure of the whole fetch cascade

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by region resolution.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The reference dataset could not be loaded, or a load was still in
    /// flight past the wait window. Retrying later may succeed.
    #[error("Region dataset unavailable")]
    DataUnavailable,

    /// Neither a city nor a district was supplied after normalization.
    /// Not retryable without different input.
    #[error("Query must include a city or a district")]
    InvalidQuery,

    /// The key and its suffix-stripped root have no dataset match.
    /// Not retryable without different input.
    #[error("No region match for '{0}'")]
    NotFound(String),

    /// The canonical payload could not be serialized.
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failure of a single quote tier.
///
/// Primary-tier instances are recovered locally by the cascade; fallback-tier
/// instances are terminal and end up wrapped in a [`FetchError`].
#[derive(Error, Debug)]
pub enum TierError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The upstream answered with a non-success HTTP status.
    #[error("HTTP status {0}")]
    Status(StatusCode),

    /// The upstream reported an application-level error code.
    #[error("Upstream error {code}: {message}")]
    Upstream { code: i64, message: String },

    /// The upstream answered successfully but listed no tickers.
    #[error("Empty result list")]
    EmptyResult,

    /// The response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Terminal failure of the fetch cascade, after every tier is exhausted.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The primary tier failed and no fallback endpoint was configured.
    #[error("No fallback endpoint configured; primary tier failed: {primary}")]
    NoFallback {
        /// Why the primary tier failed
        primary: TierError,
    },

    /// Both tiers failed; both causes are preserved for diagnosis.
    #[error("All quote tiers failed; primary: {primary}; fallback: {fallback}")]
    AllTiersFailed {
        /// Why the primary tier failed
        primary: TierError,
        /// Why the fallback tier failed
        fallback: TierError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_display() {
        assert_eq!(
            format!("{}", ResolveError::DataUnavailable),
            "Region dataset unavailable"
        );
        assert_eq!(
            format!("{}", ResolveError::NotFound("朝阳区".to_string())),
            "No region match for '朝阳区'"
        );
    }

    #[test]
    fn test_tier_error_display() {
        let error = TierError::Upstream {
            code: 10001,
            message: "params error".to_string(),
        };
        assert_eq!(format!("{}", error), "Upstream error 10001: params error");
        assert_eq!(format!("{}", TierError::EmptyResult), "Empty result list");
    }

    #[test]
    fn test_fetch_error_preserves_both_causes() {
        let error = FetchError::AllTiersFailed {
            primary: TierError::Upstream {
                code: 10001,
                message: "params error".to_string(),
            },
            fallback: TierError::Status(StatusCode::BAD_GATEWAY),
        };
        let text = format!("{}", error);
        assert!(text.contains("Upstream error 10001"));
        assert!(text.contains("502"));
    }

    #[test]
    fn test_no_fallback_names_primary_cause() {
        let error = FetchError::NoFallback {
            primary: TierError::EmptyResult,
        };
        assert_eq!(
            format!("{}", error),
            "No fallback endpoint configured; primary tier failed: Empty result list"
        );
    }
}
