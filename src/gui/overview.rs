//! Overview View
//! Trend metric cards and the progress-over-time chart.

use crate::charts::ProgressPlotter;
use crate::data::{aggregate, Measurement};
use crate::stats::{compute_trend, TrendSnapshot};
use egui::{Color32, RichText};

const WARN_COLOR: Color32 = Color32::from_rgb(255, 193, 7);
const DELTA_UP_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
const DELTA_DOWN_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Overview page: progress metrics plus the evolution chart.
pub struct OverviewView;

impl Default for OverviewView {
    fn default() -> Self {
        Self::new()
    }
}

impl OverviewView {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, measurements: &[Measurement]) {
        ui.heading("🏥 Visão Geral");
        ui.add_space(8.0);

        let points = aggregate(measurements);

        let snapshot = match compute_trend(&points) {
            Ok(snapshot) => snapshot,
            Err(_) => {
                ui.label(
                    RichText::new("Não há dados suficientes para exibir a análise.")
                        .color(WARN_COLOR),
                );
                return;
            }
        };

        ui.label(RichText::new("✳ Métricas de progresso").size(16.0).strong());
        ui.label("As métricas a seguir apresentam insights sobre o tratamento do paciente.");
        ui.add_space(8.0);

        Self::draw_metric_cards(ui, &snapshot);

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.label(RichText::new("✳ Melhora ao longo do tempo").size(16.0).strong());
        ui.label("Este gráfico mostra a evolução do paciente com base nas consultas realizadas.");
        ui.add_space(8.0);

        ProgressPlotter::draw_progress_chart(ui, &points);
    }

    fn draw_metric_cards(ui: &mut egui::Ui, snapshot: &TrendSnapshot) {
        let pct_delta = snapshot.pct_improvement_current - snapshot.pct_improvement_previous;

        ui.columns(4, |cols| {
            Self::metric_card(
                &mut cols[0],
                "Situação atual",
                &format!("{:.2}", snapshot.current),
                Some((
                    snapshot.delta_vs_previous,
                    format!("{:+.2}", snapshot.delta_vs_previous),
                )),
            );
            Self::metric_card(
                &mut cols[1],
                "Porcentagem de melhora",
                &format_pct(snapshot.pct_improvement_current),
                if pct_delta.is_nan() {
                    None
                } else {
                    Some((pct_delta, format!("{:+.2}%", pct_delta)))
                },
            );
            Self::metric_card(
                &mut cols[2],
                "Quantidade de consultas",
                &snapshot.session_count.to_string(),
                None,
            );
            Self::metric_card(
                &mut cols[3],
                "Última consulta",
                &snapshot.last_date.format("%d/%m").to_string(),
                None,
            );
        });
    }

    fn metric_card(ui: &mut egui::Ui, title: &str, value: &str, delta: Option<(f64, String)>) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(title).size(12.0).color(Color32::GRAY));
                ui.label(RichText::new(value).size(20.0).strong());
                if let Some((raw, text)) = delta {
                    let (arrow, color) = if raw >= 0.0 {
                        ("⬆", DELTA_UP_COLOR)
                    } else {
                        ("⬇", DELTA_DOWN_COLOR)
                    };
                    ui.label(RichText::new(format!("{} {}", arrow, text)).size(12.0).color(color));
                }
            });
    }
}

/// NaN percentages come from a zero baseline and are shown as missing.
fn format_pct(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{:.2}%", value)
    }
}
