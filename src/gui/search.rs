//! Search Appointment View
//! Date-filtered measurement table, summary metric and CSV export.

use crate::data::{
    filter_by_date, format_date_label, mean_progress, FilteredRow, Measurement,
    DISCOMFORT_SCALE_MAX,
};
use crate::export::{export_file_name, format_export, EXPORT_FIELDS};
use anyhow::Context;
use chrono::NaiveDate;
use egui::{Color32, ProgressBar, RichText};
use egui_extras::DatePickerButton;

const WARN_COLOR: Color32 = Color32::from_rgb(255, 193, 7);
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
const OK_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
const BAR_COLOR: Color32 = Color32::from_rgb(44, 110, 73);

/// Search page state: selected date and export column toggles.
pub struct SearchView {
    selected_date: NaiveDate,
    export_selected: [bool; 2],
    export_status: Option<String>,
    export_failed: bool,
}

impl SearchView {
    pub fn new() -> Self {
        Self {
            selected_date: chrono::Local::now().date_naive(),
            export_selected: [true, true],
            export_status: None,
            export_failed: false,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, measurements: &[Measurement]) {
        ui.heading("📅 Pesquisar Consulta");
        ui.label("Pesquise por uma data de consulta.");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Selecione a data:");
            ui.add(DatePickerButton::new(&mut self.selected_date));
        });

        if measurements.len() < 3 {
            ui.add_space(8.0);
            ui.label(
                RichText::new("Não há dados suficientes para exibir a análise.")
                    .color(WARN_COLOR),
            );
            return;
        }

        let date_label = format_date_label(self.selected_date);
        let filtered = filter_by_date(measurements, self.selected_date);

        if filtered.is_empty() {
            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Sem dados para a data {}.", date_label)).color(WARN_COLOR),
            );
            return;
        }

        ui.add_space(4.0);
        ui.label(format!("👉 Data selecionada: {}", date_label));
        ui.add_space(10.0);

        ui.label(RichText::new("✳ Dados coletados").size(16.0).strong());
        ui.label("Visualização de métricas e progresso.");
        ui.add_space(8.0);

        Self::draw_table(ui, &filtered);

        if let Some(mean) = mean_progress(&filtered) {
            ui.add_space(10.0);
            ui.label(RichText::new("Situação atual").size(12.0).color(Color32::GRAY));
            ui.label(RichText::new(format!("{:.2}", mean)).size(20.0).strong());
            let fraction = (mean / DISCOMFORT_SCALE_MAX).clamp(0.0, 1.0) as f32;
            ui.add_sized([160.0, 10.0], ProgressBar::new(fraction).fill(BAR_COLOR));
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.label(RichText::new("✳ Fazer download").size(16.0).strong());
        ui.label("Se desejar, faça o download dos dados coletados.");
        ui.add_space(5.0);

        ui.label("Escolher campos para acompanhar os dados de progresso:");
        ui.horizontal(|ui| {
            for (i, (_, label)) in EXPORT_FIELDS.iter().enumerate() {
                ui.checkbox(&mut self.export_selected[i], *label);
            }
        });

        ui.add_space(5.0);
        if ui.button("⬇ Baixar arquivo").clicked() {
            match self.save_export(&filtered) {
                Ok(Some(path)) => {
                    log::info!("Exported metrics to {}", path);
                    self.export_failed = false;
                    self.export_status = Some(format!("Arquivo salvo em {}", path));
                }
                Ok(None) => {} // dialog cancelled
                Err(e) => {
                    log::warn!("Export failed: {}", e);
                    self.export_failed = true;
                    self.export_status = Some(format!("Erro ao exportar: {}", e));
                }
            }
        }

        if let Some(status) = &self.export_status {
            let color = if self.export_failed { ERROR_COLOR } else { OK_COLOR };
            ui.label(RichText::new(status).size(11.0).color(color));
        }
    }

    fn draw_table(ui: &mut egui::Ui, rows: &[FilteredRow]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("filtered_rows")
                    .striped(true)
                    .min_col_width(80.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Data").strong().size(12.0));
                        ui.label(RichText::new("Sessão").strong().size(12.0));
                        ui.label(RichText::new("Métrica").strong().size(12.0));
                        ui.label(RichText::new("Progresso Geral").strong().size(12.0));
                        ui.end_row();

                        for row in rows {
                            ui.label(RichText::new(&row.date_label).size(12.0));
                            ui.label(RichText::new(row.session.to_string()).size(12.0));
                            ui.label(RichText::new(format!("{:.2}", row.discomfort)).size(12.0));
                            let fraction =
                                (row.progress as f64 / DISCOMFORT_SCALE_MAX).clamp(0.0, 1.0) as f32;
                            ui.add_sized(
                                [120.0, 12.0],
                                ProgressBar::new(fraction).fill(BAR_COLOR),
                            );
                            ui.end_row();
                        }
                    });
            });
    }

    /// Ask for a target file and write the selected columns as CSV.
    /// Returns the written path, or `None` when the dialog was cancelled.
    fn save_export(&self, rows: &[FilteredRow]) -> anyhow::Result<Option<String>> {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(export_file_name(self.selected_date))
            .save_file()
        else {
            return Ok(None);
        };

        let selected: Vec<String> = EXPORT_FIELDS
            .iter()
            .zip(self.export_selected.iter())
            .filter(|(_, &on)| on)
            .map(|((_, label), _)| label.to_string())
            .collect();

        let bytes = format_export(rows, &selected)?;
        std::fs::write(&path, bytes)
            .with_context(|| format!("Falha ao gravar {}", path.display()))?;

        Ok(Some(path.display().to_string()))
    }
}

impl Default for SearchView {
    fn default() -> Self {
        Self::new()
    }
}
