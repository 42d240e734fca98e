//! Raw provider payload types.
//!
//! The provider returns three parallel `[timestamp_ms, value]` sequences.
//! They are aligned by position, not by timestamp equality.

use serde::{Deserialize, Serialize};

/// One `[timestamp, value]` sample as delivered by the provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct RawSeriesPoint {
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: i64,
    pub value: f64,
}

impl RawSeriesPoint {
    pub fn new(timestamp_ms: i64, value: f64) -> Self {
        Self {
            timestamp_ms,
            value,
        }
    }
}

// CoinGecko encodes timestamps as JSON numbers, occasionally with a fractional part.
impl From<(f64, f64)> for RawSeriesPoint {
    fn from((timestamp, value): (f64, f64)) -> Self {
        Self {
            timestamp_ms: timestamp as i64,
            value,
        }
    }
}

impl From<RawSeriesPoint> for (f64, f64) {
    fn from(point: RawSeriesPoint) -> Self {
        (point.timestamp_ms as f64, point.value)
    }
}

/// The three raw series for one coin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMarketChart {
    pub prices: Vec<RawSeriesPoint>,
    pub market_caps: Vec<RawSeriesPoint>,
    pub total_volumes: Vec<RawSeriesPoint>,
}

impl RawMarketChart {
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
