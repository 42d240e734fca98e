pub mod coingecko;
pub mod core;
pub mod export;
pub mod mock;

pub use coingecko::CoinGeckoMarketDataService;
pub use export::{ExportFormat, FileExporter};
pub use mock::MockMarketDataProvider;
