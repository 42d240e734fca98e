use crate::domain::catalog::{CoinRecord, RankedCoin};
use crate::domain::market::{RawMarketChart, RawSeriesPoint};
use crate::domain::ports::{Lookback, MarketDataProvider};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::info;

const DAY_MS: i64 = 86_400_000;
const MAX_MOCK_DAYS: u32 = 730;

/// Offline provider producing deterministic synthetic history.
#[derive(Debug, Clone)]
pub struct MockMarketDataProvider {
    coins: Vec<(CoinRecord, f64)>,
    charts: HashMap<String, RawMarketChart>,
    first_day: NaiveDate,
}

impl MockMarketDataProvider {
    pub fn new() -> Self {
        let coins = vec![
            (CoinRecord::new("bitcoin", "btc", "Bitcoin"), 42_000.0),
            (CoinRecord::new("ethereum", "eth", "Ethereum"), 2_300.0),
            (CoinRecord::new("ethereum-classic", "etc", "Ethereum Classic"), 20.0),
            (CoinRecord::new("solana", "sol", "Solana"), 100.0),
            (CoinRecord::new("dogecoin", "doge", "Dogecoin"), 0.09),
        ];
        Self {
            coins,
            charts: HashMap::new(),
            first_day: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
        }
    }

    /// Serves `chart` verbatim for `coin_id`, regardless of lookback.
    pub fn with_chart(mut self, coin: CoinRecord, chart: RawMarketChart) -> Self {
        self.charts.insert(coin.id.clone(), chart);
        if !self.coins.iter().any(|(c, _)| c.id == coin.id) {
            self.coins.push((coin, 1.0));
        }
        self
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    fn synthetic_chart(&self, base_price: f64, days: u32) -> RawMarketChart {
        let start_ms = self
            .first_day
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or(0);

        let mut chart = RawMarketChart::default();
        for i in 0..days {
            let t = i as f64;
            // slow drift plus a weekly wobble keeps prices positive and varied
            let price = base_price * (1.0 + 0.0005 * t) * (1.0 + 0.03 * (t / 7.0).sin());
            let supply = 19_000_000.0 + 900.0 * t;
            let volume = price * 250_000.0 * (1.2 + (t / 3.0).cos());
            let ts = start_ms + i as i64 * DAY_MS;

            chart.prices.push(RawSeriesPoint::new(ts, price));
            chart.market_caps.push(RawSeriesPoint::new(ts, price * supply));
            chart.total_volumes.push(RawSeriesPoint::new(ts, volume));
        }
        chart
    }
}

impl Default for MockMarketDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for MockMarketDataProvider {
    async fn market_chart(
        &self,
        coin_id: &str,
        _vs_currency: &str,
        lookback: Lookback,
    ) -> Result<RawMarketChart> {
        if let Some(chart) = self.charts.get(coin_id) {
            return Ok(chart.clone());
        }

        let (_, base_price) = self
            .coins
            .iter()
            .find(|(c, _)| c.id == coin_id)
            .ok_or_else(|| anyhow::anyhow!("Mock provider: coin not found: {}", coin_id))?;

        let days = match lookback {
            Lookback::Days(days) => days.min(MAX_MOCK_DAYS),
            Lookback::Max => MAX_MOCK_DAYS,
        };
        info!("MockMarketDataProvider: generating {} days for {}", days, coin_id);
        Ok(self.synthetic_chart(*base_price, days))
    }

    async fn coins_list(&self) -> Result<Vec<CoinRecord>> {
        Ok(self.coins.iter().map(|(c, _)| c.clone()).collect())
    }

    async fn top_coins(&self, _vs_currency: &str) -> Result<Vec<RankedCoin>> {
        let mut ranked: Vec<RankedCoin> = self
            .coins
            .iter()
            .map(|(c, price)| RankedCoin {
                market_cap_rank: None,
                id: c.id.clone(),
                symbol: c.symbol.clone(),
                name: c.name.clone(),
                current_price: Some(*price),
                market_cap: Some(price * 19_000_000.0),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.market_cap
                .partial_cmp(&a.market_cap)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for (i, coin) in ranked.iter_mut().enumerate() {
            coin.market_cap_rank = Some(i as u32 + 1);
        }
        Ok(ranked)
    }
}
