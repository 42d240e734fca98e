pub mod console;
#[cfg(feature = "ui")]
pub mod plot;

#[cfg(feature = "ui")]
pub use plot::EguiPlotter;

/// Stands in for the chart window when the `ui` feature is compiled out.
#[cfg(not(feature = "ui"))]
#[derive(Debug, Clone, Default)]
pub struct UnavailablePlotter;

#[cfg(not(feature = "ui"))]
impl crate::domain::ports::Plotter for UnavailablePlotter {
    fn plot(
        &self,
        _title: &str,
        _column: crate::domain::market::MarketColumn,
        _points: &[(chrono::NaiveDate, f64)],
    ) -> anyhow::Result<()> {
        anyhow::bail!("Plotting is unavailable: rebuild with the `ui` feature")
    }
}
