//! CliniDash - Clinical Progress Dashboard
//!
//! A Rust application for tracking patient progress from CSV measurements.

use clinidash::gui::DashboardApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("CliniDash"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "CliniDash",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc)))),
    )
}
