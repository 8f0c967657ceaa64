//! Tiered ticker fetching.
//!
//! A fast direct upstream is tried first with a narrow timeout; any failure
//! there is recovered by degrading to a slower relay endpoint. Both tiers
//! produce the canonical quote payload, so callers never see which one
//! answered except through the payload's `source` tag.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;

use super::models::TickerEnvelope;
use crate::errors::{FetchError, TierError};
use crate::http::build_client;

/// Primary-tier timeout; the direct upstream is a low-latency service.
const PRIMARY_TIMEOUT: Duration = Duration::from_secs(3);

/// Fallback-tier timeout; the relay adds hops.
const FALLBACK_TIMEOUT: Duration = Duration::from_secs(10);

/// Placeholder substituted with the normalized symbol in relay templates.
const SYMBOL_PLACEHOLDER: &str = "{{symbol}}";

/// Feed configuration. Loading it from disk is a collaborator's concern.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Primary tickers endpoint.
    pub primary_url: String,
    /// Quote-currency suffix appended to bare asset symbols.
    pub quote_suffix: String,
    /// Symbol assumed when the caller passes an empty one.
    pub default_symbol: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            primary_url: "https://api.bybit.com/v5/market/tickers".to_string(),
            quote_suffix: "USDT".to_string(),
            default_symbol: "BTC".to_string(),
        }
    }
}

/// One upstream tier in the fetch cascade.
#[async_trait]
pub trait QuoteUpstream: Send + Sync {
    /// Stable identifier used in logs and error text.
    fn id(&self) -> &'static str;

    /// Fetch the canonical JSON payload for `symbol`.
    async fn fetch_payload(&self, symbol: &str) -> Result<String, TierError>;
}

/// Direct (primary) upstream speaking the `retCode`/`result.list` envelope.
pub struct DirectUpstream {
    client: Client,
    base_url: String,
}

impl DirectUpstream {
    pub fn new(base_url: String) -> Self {
        Self {
            client: build_client(PRIMARY_TIMEOUT, true),
            base_url,
        }
    }
}

#[async_trait]
impl QuoteUpstream for DirectUpstream {
    fn id(&self) -> &'static str {
        "direct"
    }

    async fn fetch_payload(&self, symbol: &str) -> Result<String, TierError> {
        let url = format!("{}?category=spot&symbol={}", self.base_url, symbol);
        debug!("Direct quote fetch: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(TierError::Status(response.status()));
        }

        let body = response.text().await?;
        let envelope: TickerEnvelope = serde_json::from_str(&body)
            .map_err(|e| TierError::Parse(format!("Failed to parse ticker response: {}", e)))?;
        let quote = envelope.into_quote()?;

        serde_json::to_string(&quote).map_err(|e| TierError::Parse(e.to_string()))
    }
}

/// Relay (fallback) upstream.
///
/// The relay already speaks the canonical shape, so a success body is
/// forwarded verbatim rather than re-normalized.
pub struct RelayUpstream {
    client: Client,
    endpoint: String,
}

impl RelayUpstream {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: build_client(FALLBACK_TIMEOUT, true),
            endpoint,
        }
    }
}

#[async_trait]
impl QuoteUpstream for RelayUpstream {
    fn id(&self) -> &'static str {
        "fallback"
    }

    async fn fetch_payload(&self, symbol: &str) -> Result<String, TierError> {
        let url = relay_url(&self.endpoint, symbol);
        debug!("Relay quote fetch: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(TierError::Status(response.status()));
        }

        Ok(response.text().await?)
    }
}

/// A blank fallback endpoint counts as absent.
fn sanitize_endpoint(endpoint: Option<&str>) -> Option<&str> {
    endpoint.map(str::trim).filter(|e| !e.is_empty())
}

/// Substitute the symbol into a relay endpoint template.
///
/// `{{symbol}}` placeholders win; an endpoint that already references the
/// symbol is left alone; otherwise a `symbol=` query parameter is appended.
fn relay_url(endpoint: &str, symbol: &str) -> String {
    let encoded = urlencoding::encode(symbol);
    if endpoint.contains(SYMBOL_PLACEHOLDER) {
        return endpoint.replace(SYMBOL_PLACEHOLDER, &encoded);
    }
    if endpoint.contains(symbol) {
        return endpoint.to_string();
    }
    if endpoint.contains('?') {
        format!("{}&symbol={}", endpoint, encoded)
    } else {
        format!("{}?symbol={}", endpoint, encoded)
    }
}

/// Two-tier quote fetcher.
pub struct TickerFeed {
    config: FeedConfig,
    primary: DirectUpstream,
    relay_client: Client,
}

impl TickerFeed {
    pub fn new(config: FeedConfig) -> Self {
        Self {
            primary: DirectUpstream::new(config.primary_url.clone()),
            relay_client: build_client(FALLBACK_TIMEOUT, true),
            config,
        }
    }

    /// Fetch a live quote, degrading to `fallback_endpoint` when the direct
    /// tier fails. Returns the canonical JSON payload.
    pub async fn fetch(
        &self,
        symbol: &str,
        fallback_endpoint: Option<&str>,
    ) -> Result<String, FetchError> {
        let symbol = self.normalize_symbol(symbol);

        let relay = sanitize_endpoint(fallback_endpoint).map(|endpoint| RelayUpstream {
            client: self.relay_client.clone(),
            endpoint: endpoint.to_string(),
        });

        cascade(
            &symbol,
            &self.primary,
            relay.as_ref().map(|r| r as &dyn QuoteUpstream),
        )
        .await
    }

    /// Coerce a bare asset ticker into the upstream's pair format without
    /// rejecting already-qualified symbols.
    fn normalize_symbol(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        let mut symbol = if trimmed.is_empty() {
            self.config.default_symbol.to_uppercase()
        } else {
            trimmed.to_uppercase()
        };

        let suffix = self.config.quote_suffix.to_uppercase();
        if symbol.chars().count() <= 4 {
            if !symbol.ends_with(&suffix) {
                symbol.push_str(&suffix);
            }
        } else if !symbol.contains(&suffix) && !symbol.contains('-') && !symbol.contains("USD") {
            symbol.push_str(&suffix);
        }
        symbol
    }
}

/// Try the primary tier, then the fallback.
///
/// A primary failure is recovered locally (logged, never propagated); only
/// the exhaustion of every tier is terminal.
async fn cascade(
    symbol: &str,
    primary: &dyn QuoteUpstream,
    fallback: Option<&dyn QuoteUpstream>,
) -> Result<String, FetchError> {
    let primary_err = match primary.fetch_payload(symbol).await {
        Ok(payload) => return Ok(payload),
        Err(e) => {
            warn!("Quote tier '{}' failed for {}: {}", primary.id(), symbol, e);
            e
        }
    };

    let Some(fallback) = fallback else {
        return Err(FetchError::NoFallback {
            primary: primary_err,
        });
    };

    match fallback.fetch_payload(symbol).await {
        Ok(payload) => Ok(payload),
        Err(fallback_err) => {
            warn!(
                "Quote tier '{}' failed for {}: {}",
                fallback.id(),
                symbol,
                fallback_err
            );
            Err(FetchError::AllTiersFailed {
                primary: primary_err,
                fallback: fallback_err,
            })
        }
    }
}
