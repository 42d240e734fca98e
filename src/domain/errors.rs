use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while shaping or slicing a market table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarketDataError {
    #[error(
        "Series length mismatch: prices={prices}, market_caps={market_caps}, total_volumes={total_volumes}"
    )]
    ShapeMismatch {
        prices: usize,
        market_caps: usize,
        total_volumes: usize,
    },

    #[error("Empty input: the {series} series has no data points")]
    EmptyInput { series: &'static str },

    #[error("Non-positive price {price} on {date}: log return undefined")]
    NonPositivePrice { date: NaiveDate, price: f64 },

    #[error("Dates not strictly increasing at row {index}: {previous} then {current}")]
    UnorderedDates {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("Timestamp {timestamp_ms}ms is out of range")]
    InvalidTimestamp { timestamp_ms: i64 },

    #[error("Date {date} not found in table index")]
    DateNotFound { date: NaiveDate },

    #[error("Inverted range: start {start} is after end {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date '{input}': expected yyyy-mm-dd")]
    InvalidDate { input: String },
}

/// Errors raised by coin catalog lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Unknown symbol: {symbol}")]
    UnknownSymbol { symbol: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_formatting() {
        let error = MarketDataError::ShapeMismatch {
            prices: 3,
            market_caps: 2,
            total_volumes: 3,
        };

        let msg = error.to_string();
        assert!(msg.contains("prices=3"));
        assert!(msg.contains("market_caps=2"));
    }

    #[test]
    fn test_inverted_range_formatting() {
        let error = MarketDataError::InvertedRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };

        let msg = error.to_string();
        assert!(msg.contains("2024-01-05"));
        assert!(msg.contains("2024-01-01"));
    }

    #[test]
    fn test_unknown_symbol_formatting() {
        let error = CatalogError::UnknownSymbol {
            symbol: "xyz".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown symbol: xyz");
    }
}
