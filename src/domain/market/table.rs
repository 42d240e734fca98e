//! Normalized, date-indexed market table.
//!
//! Built from the provider's three parallel series. Rows are ordered by
//! strictly increasing calendar date and the date is the row key.

use super::column::MarketColumn;
use super::range::DateRange;
use super::series::{RawMarketChart, RawSeriesPoint};
use crate::domain::errors::MarketDataError;
use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

/// One day of market history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketRow {
    pub date: NaiveDate,
    pub price: f64,
    /// `None` on the first row and wherever either price is non-positive
    pub log_return: Option<f64>,
    pub market_cap: f64,
    pub total_volume: f64,
}

impl MarketRow {
    pub fn value(&self, column: MarketColumn) -> Option<f64> {
        match column {
            MarketColumn::Price => Some(self.price),
            MarketColumn::LogReturn => self.log_return,
            MarketColumn::MarketCap => Some(self.market_cap),
            MarketColumn::TotalVolume => Some(self.total_volume),
        }
    }
}

/// Flattened row handed to exporters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    pub date: String,
    pub price: f64,
    pub log_return: Option<f64>,
    pub market_cap: f64,
    pub total_volume: f64,
}

impl From<&MarketRow> for ExportRecord {
    fn from(row: &MarketRow) -> Self {
        Self {
            date: row.date.format(super::range::DATE_FORMAT).to_string(),
            price: row.price,
            log_return: row.log_return,
            market_cap: row.market_cap,
            total_volume: row.total_volume,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketTable {
    rows: Vec<MarketRow>,
}

impl MarketTable {
    /// Builds a table from three position-aligned series.
    ///
    /// Every sequence must be non-empty and of the same length. Timestamps are
    /// truncated to their UTC calendar date. A non-positive price does not
    /// abort the build: the affected log returns are left undefined and the
    /// row shows up in [`MarketTable::price_anomalies`].
    pub fn normalize(
        prices: &[RawSeriesPoint],
        market_caps: &[RawSeriesPoint],
        total_volumes: &[RawSeriesPoint],
    ) -> Result<Self, MarketDataError> {
        for (series, points) in [
            ("price", prices),
            ("market_cap", market_caps),
            ("total_volume", total_volumes),
        ] {
            if points.is_empty() {
                return Err(MarketDataError::EmptyInput { series });
            }
        }

        if prices.len() != market_caps.len() || prices.len() != total_volumes.len() {
            return Err(MarketDataError::ShapeMismatch {
                prices: prices.len(),
                market_caps: market_caps.len(),
                total_volumes: total_volumes.len(),
            });
        }

        let mut rows: Vec<MarketRow> = Vec::with_capacity(prices.len());
        for (index, ((price, cap), volume)) in prices
            .iter()
            .zip(market_caps.iter())
            .zip(total_volumes.iter())
            .enumerate()
        {
            let date = date_from_millis(price.timestamp_ms)?;

            let log_return = match rows.last() {
                Some(previous) => {
                    if date <= previous.date {
                        return Err(MarketDataError::UnorderedDates {
                            index,
                            previous: previous.date,
                            current: date,
                        });
                    }
                    log_return(previous.price, price.value)
                }
                None => None,
            };

            if price.value <= 0.0 {
                warn!(
                    "{}",
                    MarketDataError::NonPositivePrice {
                        date,
                        price: price.value
                    }
                );
            }

            rows.push(MarketRow {
                date,
                price: price.value,
                log_return,
                market_cap: cap.value,
                total_volume: volume.value,
            });
        }

        debug!(
            "MarketTable: normalized {} rows ({:?} to {:?})",
            rows.len(),
            rows.first().map(|r| r.date),
            rows.last().map(|r| r.date)
        );

        Ok(Self { rows })
    }

    pub fn from_chart(chart: &RawMarketChart) -> Result<Self, MarketDataError> {
        Self::normalize(&chart.prices, &chart.market_caps, &chart.total_volumes)
    }

    pub fn rows(&self) -> &[MarketRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    /// The range spanning the whole index, if the table has rows
    pub fn full_range(&self) -> Option<DateRange> {
        let (first, last) = (self.first_date()?, self.last_date()?);
        DateRange::new(first, last).ok()
    }

    /// Row position of an exact date match.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.rows.binary_search_by_key(&date, |r| r.date).ok()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&MarketRow> {
        self.position(date).map(|i| &self.rows[i])
    }

    /// Returns a new table holding the rows dated within `[start, end]`.
    ///
    /// Both bounds must be dates present in the index.
    pub fn slice(&self, start: NaiveDate, end: NaiveDate) -> Result<MarketTable, MarketDataError> {
        if start > end {
            return Err(MarketDataError::InvertedRange { start, end });
        }
        let from = self
            .position(start)
            .ok_or(MarketDataError::DateNotFound { date: start })?;
        let to = self
            .position(end)
            .ok_or(MarketDataError::DateNotFound { date: end })?;

        Ok(MarketTable {
            rows: self.rows[from..=to].to_vec(),
        })
    }

    pub fn slice_range(&self, range: &DateRange) -> Result<MarketTable, MarketDataError> {
        self.slice(range.start(), range.end())
    }

    /// Rows whose price makes a log return undefined
    pub fn price_anomalies(&self) -> Vec<MarketDataError> {
        self.rows
            .iter()
            .filter(|r| r.price <= 0.0)
            .map(|r| MarketDataError::NonPositivePrice {
                date: r.date,
                price: r.price,
            })
            .collect()
    }

    /// Defined values of one column against the date index.
    pub fn column(&self, column: MarketColumn) -> Vec<(NaiveDate, f64)> {
        self.rows
            .iter()
            .filter_map(|r| r.value(column).map(|v| (r.date, v)))
            .collect()
    }

    pub fn head(&self, n: usize) -> &[MarketRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn tail(&self, n: usize) -> &[MarketRow] {
        &self.rows[self.rows.len().saturating_sub(n)..]
    }

    pub fn to_records(&self) -> Vec<ExportRecord> {
        self.rows.iter().map(ExportRecord::from).collect()
    }
}

fn date_from_millis(timestamp_ms: i64) -> Result<NaiveDate, MarketDataError> {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.date_naive())
        .ok_or(MarketDataError::InvalidTimestamp { timestamp_ms })
}

fn log_return(previous: f64, current: f64) -> Option<f64> {
    if previous > 0.0 && current > 0.0 {
        let r = (current / previous).ln();
        r.is_finite().then_some(r)
    } else {
        None
    }
}
