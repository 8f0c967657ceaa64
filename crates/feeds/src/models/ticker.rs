use serde::{Deserialize, Serialize};

/// Which tier produced a quote payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    Direct,
    Fallback,
}

/// Canonical normalized ticker record, independent of the producing tier.
///
/// Prices and volume are passed through as the upstream's decimal strings;
/// only the 24h change is reshaped (fraction to rounded percentage).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerQuote {
    pub name: String,
    pub price: String,
    pub change_percent: f64,
    pub high: String,
    pub low: String,
    pub vol: String,
    pub source: QuoteSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_field_names() {
        let quote = TickerQuote {
            name: "BTCUSDT".to_string(),
            price: "67000.5".to_string(),
            change_percent: 2.5,
            high: "68000".to_string(),
            low: "65000".to_string(),
            vol: "12345678".to_string(),
            source: QuoteSource::Direct,
        };

        let json = serde_json::to_string(&quote).unwrap();
        assert!(json.contains("\"change_percent\":2.5"));
        assert!(json.contains("\"vol\":\"12345678\""));
        assert!(json.contains("\"source\":\"direct\""));
    }

    #[test]
    fn test_source_tag_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&QuoteSource::Fallback).unwrap(),
            "\"fallback\""
        );
    }
}
