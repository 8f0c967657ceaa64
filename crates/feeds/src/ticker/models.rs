//! Wire models for the primary quote upstream.
//!
//! The primary tier answers with a `retCode`/`retMsg` envelope around a
//! ticker list; only the first listed ticker is consumed.

use serde::Deserialize;

use crate::errors::TierError;
use crate::models::{QuoteSource, TickerQuote};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TickerEnvelope {
    pub ret_code: i64,
    #[serde(default)]
    pub ret_msg: String,
    #[serde(default)]
    pub result: TickerResult,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TickerResult {
    #[serde(default)]
    pub list: Vec<TickerItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TickerItem {
    pub symbol: String,
    #[serde(default)]
    pub last_price: String,
    #[serde(default)]
    pub price_24h_pcnt: String,
    #[serde(default)]
    pub high_price_24h: String,
    #[serde(default)]
    pub low_price_24h: String,
    #[serde(default)]
    pub turnover_24h: String,
}

impl TickerEnvelope {
    /// Normalize the first listed ticker into the canonical record.
    ///
    /// A non-zero `retCode` is an upstream-reported error and fails the
    /// tier; so does an empty list (symbol unknown upstream).
    pub(crate) fn into_quote(self) -> Result<TickerQuote, TierError> {
        if self.ret_code != 0 {
            return Err(TierError::Upstream {
                code: self.ret_code,
                message: self.ret_msg,
            });
        }

        let item = self
            .result
            .list
            .into_iter()
            .next()
            .ok_or(TierError::EmptyResult)?;

        Ok(TickerQuote {
            change_percent: change_percent(&item.price_24h_pcnt),
            name: item.symbol,
            price: item.last_price,
            high: item.high_price_24h,
            low: item.low_price_24h,
            vol: item.turnover_24h,
            source: QuoteSource::Direct,
        })
    }
}

/// Convert the upstream's fractional 24h change ("0.025") to a percentage
/// rounded to two decimals. Missing or unparseable values become 0.
fn change_percent(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| (v * 100.0 * 100.0).round() / 100.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_deserialization() {
        let json = r#"{
            "retCode": 0,
            "retMsg": "OK",
            "result": {
                "list": [{
                    "symbol": "BTCUSDT",
                    "lastPrice": "67000.5",
                    "price24hPcnt": "0.025",
                    "highPrice24h": "68000",
                    "lowPrice24h": "65000",
                    "turnover24h": "12345678"
                }]
            }
        }"#;

        let envelope: TickerEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.ret_code, 0);
        assert_eq!(envelope.result.list.len(), 1);
        assert_eq!(envelope.result.list[0].last_price, "67000.5");
    }

    #[test]
    fn test_into_quote_normalizes_change() {
        let json = r#"{
            "retCode": 0,
            "retMsg": "OK",
            "result": {
                "list": [{
                    "symbol": "BTCUSDT",
                    "lastPrice": "67000.5",
                    "price24hPcnt": "0.025",
                    "highPrice24h": "68000",
                    "lowPrice24h": "65000",
                    "turnover24h": "12345678"
                }]
            }
        }"#;

        let quote = serde_json::from_str::<TickerEnvelope>(json)
            .unwrap()
            .into_quote()
            .unwrap();
        assert_eq!(quote.name, "BTCUSDT");
        assert_eq!(quote.change_percent, 2.5);
        assert_eq!(quote.source, QuoteSource::Direct);
    }

    #[test]
    fn test_non_zero_ret_code_fails_the_tier() {
        let json = r#"{"retCode": 10001, "retMsg": "params error", "result": {"list": []}}"#;

        let err = serde_json::from_str::<TickerEnvelope>(json)
            .unwrap()
            .into_quote()
            .unwrap_err();
        match err {
            TierError::Upstream { code, message } => {
                assert_eq!(code, 10001);
                assert_eq!(message, "params error");
            }
            other => panic!("expected Upstream, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_list_fails_the_tier() {
        let json = r#"{"retCode": 0, "retMsg": "OK", "result": {"list": []}}"#;

        let err = serde_json::from_str::<TickerEnvelope>(json)
            .unwrap()
            .into_quote()
            .unwrap_err();
        assert!(matches!(err, TierError::EmptyResult));
    }

    #[test]
    fn test_missing_fields_default() {
        let json = r#"{"retCode": 0, "result": {"list": [{"symbol": "ETHUSDT"}]}}"#;

        let quote = serde_json::from_str::<TickerEnvelope>(json)
            .unwrap()
            .into_quote()
            .unwrap();
        assert_eq!(quote.price, "");
        assert_eq!(quote.change_percent, 0.0);
    }

    #[test]
    fn test_change_percent_conversion() {
        assert_eq!(change_percent("0.025"), 2.5);
        assert_eq!(change_percent("-0.0456"), -4.56);
        assert_eq!(change_percent("0.012345"), 1.23);
        assert_eq!(change_percent(""), 0.0);
        assert_eq!(change_percent("n/a"), 0.0);
        assert_eq!(change_percent("NaN"), 0.0);
    }
}
