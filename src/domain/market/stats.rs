use super::column::MarketColumn;
use super::table::MarketTable;
use statrs::statistics::{Data, Distribution, Max, Median, Min, OrderStatistics};

/// Descriptive statistics for one column, undefined values excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: MarketColumn,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n-1); NaN with fewer than two values
    pub std_dev: f64,
    pub min: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub upper_quartile: f64,
    pub max: f64,
}

impl ColumnSummary {
    pub fn from_values(column: MarketColumn, values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len();
        let mut data = Data::new(values);

        Some(Self {
            column,
            count,
            mean: data.mean().unwrap_or(f64::NAN),
            std_dev: data.std_dev().unwrap_or(f64::NAN),
            min: data.min(),
            lower_quartile: data.lower_quartile(),
            median: data.median(),
            upper_quartile: data.upper_quartile(),
            max: data.max(),
        })
    }
}

impl MarketTable {
    /// `describe`-style summary of every numeric column.
    pub fn summary(&self) -> Vec<ColumnSummary> {
        MarketColumn::ALL
            .iter()
            .filter_map(|&column| {
                let values = self.column(column).into_iter().map(|(_, v)| v).collect();
                ColumnSummary::from_values(column, values)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::series::RawSeriesPoint;

    fn points(values: &[f64]) -> Vec<RawSeriesPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| RawSeriesPoint::new(i as i64 * 86_400_000, *v))
            .collect()
    }

    #[test]
    fn test_summary_excludes_undefined_returns() {
        let table = MarketTable::normalize(
            &points(&[100.0, 110.0, 121.0]),
            &points(&[1.0, 2.0, 3.0]),
            &points(&[10.0, 20.0, 30.0]),
        )
        .unwrap();

        let summary = table.summary();
        assert_eq!(summary.len(), 4);

        let returns = summary
            .iter()
            .find(|s| s.column == MarketColumn::LogReturn)
            .unwrap();
        assert_eq!(returns.count, 2);
        assert!((returns.mean - 1.1f64.ln()).abs() < 1e-9);

        let caps = summary
            .iter()
            .find(|s| s.column == MarketColumn::MarketCap)
            .unwrap();
        assert_eq!(caps.count, 3);
        assert!((caps.mean - 2.0).abs() < 1e-12);
        assert!((caps.std_dev - 1.0).abs() < 1e-12);
        assert_eq!(caps.min, 1.0);
        assert_eq!(caps.max, 3.0);
        assert_eq!(caps.median, 2.0);
    }

    #[test]
    fn test_single_row_has_no_return_summary() {
        let table =
            MarketTable::normalize(&points(&[5.0]), &points(&[1.0]), &points(&[1.0])).unwrap();
        let summary = table.summary();
        assert_eq!(summary.len(), 3);
        assert!(summary.iter().all(|s| s.column != MarketColumn::LogReturn));
    }
}
