//! Progress Chart Module
//! Line chart of mean discomfort over time using egui_plot.

use crate::data::AggregatedPoint;
use egui::Color32;
use egui_plot::{Line, Plot, PlotPoints, Points};

/// Line color for the progress series.
pub const LINE_COLOR: Color32 = Color32::from_rgb(44, 110, 73);

/// Creates the progress-over-time visualization using egui_plot.
pub struct ProgressPlotter;

impl ProgressPlotter {
    /// Draw the progress line chart: one x position per aggregated point,
    /// labelled with the point's date.
    pub fn draw_progress_chart(ui: &mut egui::Ui, points: &[AggregatedPoint]) {
        let date_labels: Vec<String> = points
            .iter()
            .map(|p| p.date.format("%Y-%m-%d").to_string())
            .collect();

        let series: Vec<[f64; 2]> = points
            .iter()
            .enumerate()
            .map(|(i, p)| [i as f64, p.discomfort])
            .collect();

        Plot::new("progress_chart")
            .height(320.0)
            .allow_scroll(false)
            .x_axis_label("Data")
            .y_axis_label("Progresso")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if idx < date_labels.len() {
                    date_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(series.iter().copied()))
                        .color(LINE_COLOR)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(series.iter().copied()))
                        .radius(4.0)
                        .color(LINE_COLOR),
                );
            });
    }
}
