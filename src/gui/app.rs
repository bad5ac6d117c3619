//! Dashboard Application
//! Main window with view switching and background CSV reloading.

use crate::data::{default_data_path, Measurement, MetricsLoader};
use crate::gui::{OverviewView, SearchView};
use egui::{Color32, RichText};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// CSV loading result from the background thread.
enum LoadResult {
    Complete { measurements: Vec<Measurement> },
    Error(String),
}

/// Dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Overview,
    Search,
}

/// Main application window.
pub struct DashboardApp {
    data_path: PathBuf,
    measurements: Vec<Measurement>,
    view: View,
    overview: OverviewView,
    search: SearchView,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
    status: String,
    load_failed: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            data_path: default_data_path(),
            measurements: Vec::new(),
            view: View::Overview,
            overview: OverviewView::new(),
            search: SearchView::new(),
            load_rx: None,
            is_loading: false,
            status: String::new(),
            load_failed: false,
        };
        app.start_reload();
        app
    }

    /// Re-read the measurements CSV in a background thread. Every reload
    /// recomputes all derived views from scratch; nothing is cached.
    fn start_reload(&mut self) {
        if self.is_loading {
            return;
        }

        self.is_loading = true;
        self.load_failed = false;
        self.status = "Carregando medições...".to_string();

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let path = self.data_path.clone();

        thread::spawn(move || {
            let mut loader = MetricsLoader::new();
            let result = match loader.load_csv(&path) {
                Ok(_) => loader.measurements(),
                Err(e) => Err(e),
            };

            match result {
                Ok(measurements) => {
                    let _ = tx.send(LoadResult::Complete { measurements });
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for CSV loading results.
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Complete { measurements } => {
                        log::info!(
                            "Loaded {} measurements from {}",
                            measurements.len(),
                            self.data_path.display()
                        );
                        self.status = format!("{} medições carregadas", measurements.len());
                        self.measurements = measurements;
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        log::warn!("Measurement load failed: {}", error);
                        self.status = format!("Erro ao carregar dados: {}", error);
                        self.measurements.clear();
                        self.load_failed = true;
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("view_tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.view, View::Overview, "🏥 Visão Geral");
                ui.selectable_value(&mut self.view, View::Search, "📅 Pesquisar Consulta");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⟳ Recarregar").clicked() {
                        self.start_reload();
                    }

                    let status_color = if self.load_failed {
                        Color32::from_rgb(220, 53, 69)
                    } else {
                        Color32::GRAY
                    };
                    ui.label(RichText::new(&self.status).size(11.0).color(status_color));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if self.is_loading {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                    return;
                }

                match self.view {
                    View::Overview => self.overview.show(ui, &self.measurements),
                    View::Search => self.search.show(ui, &self.measurements),
                }
            });
        });
    }
}
