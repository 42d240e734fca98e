use crate::domain::catalog::{CoinRecord, RankedCoin};
use crate::domain::market::{MarketColumn, RawMarketChart};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// How far back to fetch history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    Days(u32),
    Max,
}

impl Lookback {
    /// Keyless CoinGecko access only serves the past year of history
    pub const DEFAULT_DAYS: u32 = 365;
}

impl Default for Lookback {
    fn default() -> Self {
        Lookback::Days(Self::DEFAULT_DAYS)
    }
}

impl std::fmt::Display for Lookback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookback::Days(days) => write!(f, "{}", days),
            Lookback::Max => write!(f, "max"),
        }
    }
}

impl std::str::FromStr for Lookback {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("max") {
            return Ok(Lookback::Max);
        }
        let days: u32 = s
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid lookback: {}. Must be a day count or 'max'", s))?;
        if days == 0 {
            anyhow::bail!("Lookback must be at least one day");
        }
        Ok(Lookback::Days(days))
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily price, market cap and volume history for one coin
    async fn market_chart(
        &self,
        coin_id: &str,
        vs_currency: &str,
        lookback: Lookback,
    ) -> Result<RawMarketChart>;

    /// Every coin the provider knows about
    async fn coins_list(&self) -> Result<Vec<CoinRecord>>;

    /// Top coins by market cap
    async fn top_coins(&self, vs_currency: &str) -> Result<Vec<RankedCoin>>;
}

/// Renders one column of a table over its date index.
pub trait Plotter {
    fn plot(&self, title: &str, column: MarketColumn, points: &[(NaiveDate, f64)]) -> Result<()>;
}
