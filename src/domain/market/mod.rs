pub mod column;
pub mod range;
pub mod series;
pub mod stats;
pub mod table;

pub use column::MarketColumn;
pub use range::{DATE_FORMAT, DateRange, parse_date};
pub use series::{RawMarketChart, RawSeriesPoint};
pub use stats::ColumnSummary;
pub use table::{ExportRecord, MarketRow, MarketTable};
