use crate::domain::market::MarketColumn;
use crate::domain::ports::Plotter;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use eframe::egui;
use egui_plot::{Legend, Line, Plot};
use tracing::info;

/// Opens a native window with a line chart; blocks until the window is closed.
#[derive(Debug, Clone, Default)]
pub struct EguiPlotter;

/// Maps dates onto the x axis as days since 0001-01-01.
pub fn plot_points(points: &[(NaiveDate, f64)]) -> Vec<[f64; 2]> {
    points
        .iter()
        .map(|(date, value)| [date.num_days_from_ce() as f64, *value])
        .collect()
}

fn axis_date(x: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.to_string())
        .unwrap_or_default()
}

struct ChartWindow {
    title: String,
    column: MarketColumn,
    points: Vec<[f64; 2]>,
}

impl eframe::App for ChartWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(&self.title);
            ui.add_space(6.0);

            Plot::new("market_chart")
                .legend(Legend::default())
                .show_grid([true, true])
                .x_axis_formatter(|mark, _range| axis_date(mark.value))
                .label_formatter(|name, value| {
                    format!("{}\n{}: {:.3}", axis_date(value.x), name, value.y)
                })
                .show(ui, |plot_ui| {
                    plot_ui.line(
                        Line::new(self.column.to_string(), self.points.clone())
                            .color(egui::Color32::from_rgb(100, 200, 255)),
                    );
                });
        });
    }
}

impl Plotter for EguiPlotter {
    fn plot(&self, title: &str, column: MarketColumn, points: &[(NaiveDate, f64)]) -> Result<()> {
        if points.is_empty() {
            anyhow::bail!("No {} values to plot", column);
        }
        info!("Plotting {} points of {}", points.len(), column);

        let window = ChartWindow {
            title: title.to_string(),
            column,
            points: plot_points(points),
        };
        let native_options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1000.0, 600.0])
                .with_title(title),
            ..Default::default()
        };

        eframe::run_native(
            "coinframe chart",
            native_options,
            Box::new(|_cc| Ok(Box::new(window))),
        )
        .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_points_round_trip_axis_labels() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let points = plot_points(&[(date, 1.5)]);
        assert_eq!(points[0][1], 1.5);
        assert_eq!(axis_date(points[0][0]), "2024-02-29");
    }

    #[test]
    fn test_consecutive_days_are_one_unit_apart() {
        let a = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let points = plot_points(&[(a, 0.0), (b, 0.0)]);
        assert_eq!(points[1][0] - points[0][0], 1.0);
    }
}
