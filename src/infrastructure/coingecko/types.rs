//! Wire types for the CoinGecko REST API

use crate::domain::catalog::{CoinRecord, RankedCoin};
use serde::Deserialize;

/// Entry of `GET /coins/list`
#[derive(Debug, Deserialize)]
pub struct CoinListEntry {
    pub id: String,
    pub symbol: String,
    #[serde(default)]
    pub name: String,
}

impl From<CoinListEntry> for CoinRecord {
    fn from(entry: CoinListEntry) -> Self {
        CoinRecord::new(entry.id, entry.symbol, entry.name)
    }
}

/// Entry of `GET /coins/markets`
#[derive(Debug, Deserialize)]
pub struct MarketsEntry {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
}

impl From<MarketsEntry> for RankedCoin {
    fn from(entry: MarketsEntry) -> Self {
        RankedCoin {
            market_cap_rank: entry.market_cap_rank,
            id: entry.id,
            symbol: entry.symbol.to_lowercase(),
            name: entry.name,
            current_price: entry.current_price,
            market_cap: entry.market_cap,
        }
    }
}

/// Error body CoinGecko returns alongside 4xx statuses
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub status: Option<ErrorStatus>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorStatus {
    pub error_message: Option<String>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or_else(|| self.status.as_ref()?.error_message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coins_list() {
        let json = r#"[
            {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin"},
            {"id": "ethereum", "symbol": "ETH", "name": "Ethereum"}
        ]"#;
        let entries: Vec<CoinListEntry> = serde_json::from_str(json).unwrap();
        let records: Vec<CoinRecord> = entries.into_iter().map(CoinRecord::from).collect();
        assert_eq!(records[1].symbol, "eth");
        assert_eq!(records[1].id, "ethereum");
    }

    #[test]
    fn test_parse_markets_with_nulls() {
        let json = r#"[{
            "id": "bitcoin", "symbol": "btc", "name": "Bitcoin",
            "image": "https://example.invalid/btc.png",
            "current_price": 67000.5, "market_cap": 1.3e12, "market_cap_rank": 1
        }, {
            "id": "newcoin", "symbol": "new", "name": "New",
            "current_price": null, "market_cap": null, "market_cap_rank": null
        }]"#;
        let entries: Vec<MarketsEntry> = serde_json::from_str(json).unwrap();
        let ranked: Vec<RankedCoin> = entries.into_iter().map(RankedCoin::from).collect();
        assert_eq!(ranked[0].market_cap_rank, Some(1));
        assert_eq!(ranked[1].market_cap_rank, None);
    }

    #[test]
    fn test_error_body_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"error": "coin not found"}"#).unwrap();
        assert_eq!(body.message(), Some("coin not found"));

        let body: ErrorBody = serde_json::from_str(
            r#"{"status": {"error_code": 429, "error_message": "You've exceeded the Rate Limit"}}"#,
        )
        .unwrap();
        assert_eq!(body.message(), Some("You've exceeded the Rate Limit"));
    }
}
