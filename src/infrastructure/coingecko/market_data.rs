//! CoinGecko Market Data Service
//!
//! Endpoints used:
//! - /coins/{id}/market_chart - daily price, market cap and volume history
//! - /coins/list - every coin id with its ticker
//! - /coins/markets - market-cap leaderboard

use super::types::{CoinListEntry, ErrorBody, MarketsEntry};
use crate::config::CoinGeckoConfig;
use crate::domain::catalog::{CoinRecord, RankedCoin};
use crate::domain::market::RawMarketChart;
use crate::domain::ports::{Lookback, MarketDataProvider};
use crate::infrastructure::core::http_client_factory::{HttpClientFactory, build_url_with_query};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

pub struct CoinGeckoMarketDataService {
    client: ClientWithMiddleware,
    base_url: String,
}

impl CoinGeckoMarketDataService {
    pub fn new(config: &CoinGeckoConfig) -> Self {
        Self {
            client: HttpClientFactory::create_client(config),
            base_url: config.base_url.clone(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        debug!("CoinGecko: GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {} from CoinGecko", what))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&error_text)
                .ok()
                .and_then(|body| body.message().map(str::to_string))
                .unwrap_or(error_text);
            anyhow::bail!("CoinGecko {} request failed ({}): {}", what, status, detail);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse CoinGecko {} response", what))
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoMarketDataService {
    async fn market_chart(
        &self,
        coin_id: &str,
        vs_currency: &str,
        lookback: Lookback,
    ) -> Result<RawMarketChart> {
        info!(
            "CoinGecko: fetching {} history for {} ({} days)",
            vs_currency, coin_id, lookback
        );

        let url = build_url_with_query(
            &self.base_url,
            &format!("coins/{}/market_chart", coin_id),
            &[
                ("vs_currency", vs_currency.to_string()),
                ("days", lookback.to_string()),
                ("interval", "daily".to_string()),
            ],
        )?;

        let chart: RawMarketChart = self.get_json(url, "market_chart").await?;
        let chart = collapse_intraday_tail(chart);

        info!(
            "CoinGecko: received {} daily samples for {}",
            chart.len(),
            coin_id
        );
        Ok(chart)
    }

    async fn coins_list(&self) -> Result<Vec<CoinRecord>> {
        info!("CoinGecko: fetching coin list");
        let url = build_url_with_query::<&str, &str>(&self.base_url, "coins/list", &[])?;
        let entries: Vec<CoinListEntry> = self.get_json(url, "coins/list").await?;

        info!("CoinGecko: catalog has {} coins", entries.len());
        Ok(entries.into_iter().map(CoinRecord::from).collect())
    }

    async fn top_coins(&self, vs_currency: &str) -> Result<Vec<RankedCoin>> {
        let url = build_url_with_query(
            &self.base_url,
            "coins/markets",
            &[
                ("vs_currency", vs_currency),
                ("order", "market_cap_desc"),
                ("per_page", "100"),
                ("page", "1"),
            ],
        )?;
        let entries: Vec<MarketsEntry> = self.get_json(url, "coins/markets").await?;

        let mut ranked: Vec<RankedCoin> = entries.into_iter().map(RankedCoin::from).collect();
        ranked.sort_by_key(|c| c.market_cap_rank.unwrap_or(u32::MAX));
        Ok(ranked)
    }
}

/// Drops the second-to-last sample when the last one falls on the same UTC day.
///
/// With `interval=daily` CoinGecko appends a live sample taken "now" after
/// the midnight sample of the current day. Only the live sample is kept so
/// every position maps to a distinct calendar date.
pub fn collapse_intraday_tail(mut chart: RawMarketChart) -> RawMarketChart {
    let n = chart.prices.len();
    if n < 2 || chart.market_caps.len() != n || chart.total_volumes.len() != n {
        return chart;
    }

    let day = |ms: i64| DateTime::from_timestamp_millis(ms).map(|dt| dt.date_naive());
    let last = day(chart.prices[n - 1].timestamp_ms);
    if last.is_some() && last == day(chart.prices[n - 2].timestamp_ms) {
        debug!("CoinGecko: collapsing intraday tail sample");
        chart.prices.remove(n - 2);
        chart.market_caps.remove(n - 2);
        chart.total_volumes.remove(n - 2);
    }
    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::RawSeriesPoint;

    const DAY_MS: i64 = 86_400_000;

    fn chart(timestamps: &[i64]) -> RawMarketChart {
        let points: Vec<RawSeriesPoint> = timestamps
            .iter()
            .enumerate()
            .map(|(i, &t)| RawSeriesPoint::new(t, i as f64 + 1.0))
            .collect();
        RawMarketChart {
            prices: points.clone(),
            market_caps: points.clone(),
            total_volumes: points,
        }
    }

    #[test]
    fn test_collapse_intraday_tail_keeps_live_sample() {
        let c = collapse_intraday_tail(chart(&[0, DAY_MS, DAY_MS + 3_600_000]));
        assert_eq!(c.len(), 2);
        assert_eq!(c.prices[1].timestamp_ms, DAY_MS + 3_600_000);
        assert_eq!(c.prices[1].value, 3.0);
        assert_eq!(c.total_volumes.len(), 2);
    }

    #[test]
    fn test_collapse_leaves_daily_series_alone() {
        let c = collapse_intraday_tail(chart(&[0, DAY_MS, 2 * DAY_MS]));
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_collapse_skips_misaligned_series() {
        let mut c = chart(&[0, 1_000]);
        c.market_caps.pop();
        let c = collapse_intraday_tail(c);
        assert_eq!(c.prices.len(), 2);
    }
}
