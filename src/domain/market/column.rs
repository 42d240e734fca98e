use std::fmt;
use std::str::FromStr;

/// Numeric columns of a market table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketColumn {
    Price,
    LogReturn,
    MarketCap,
    TotalVolume,
}

impl MarketColumn {
    pub const ALL: [MarketColumn; 4] = [
        MarketColumn::Price,
        MarketColumn::LogReturn,
        MarketColumn::MarketCap,
        MarketColumn::TotalVolume,
    ];

    /// Column header used in exports
    pub fn header(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::LogReturn => "log_return",
            Self::MarketCap => "market_cap",
            Self::TotalVolume => "total_volume",
        }
    }
}

impl fmt::Display for MarketColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Price => write!(f, "price"),
            Self::LogReturn => write!(f, "log returns"),
            Self::MarketCap => write!(f, "market cap"),
            Self::TotalVolume => write!(f, "total volume"),
        }
    }
}

impl FromStr for MarketColumn {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "price" | "prices" => Ok(Self::Price),
            "log returns" | "log return" | "returns" => Ok(Self::LogReturn),
            "market cap" | "market caps" => Ok(Self::MarketCap),
            "total volume" | "total volumes" | "volume" => Ok(Self::TotalVolume),
            _ => anyhow::bail!(
                "Invalid column: {}. Must be 'price', 'log returns', 'market cap' or 'total volume'",
                s
            ),
        }
    }
}
