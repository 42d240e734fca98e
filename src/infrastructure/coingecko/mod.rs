pub mod market_data;
pub mod types;

pub use market_data::{CoinGeckoMarketDataService, collapse_intraday_tail};
