//! Olympics Dashboard - Historical Medal & Participation Viewer
//!
//! A Rust application for exploring Olympic results through tables and
//! interactive charts.

mod charts;
mod gui;

use clap::Parser;
use eframe::egui;
use gui::OlympicsApp;
use olympics_dashboard::config::AppConfig;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::parse();
    log::info!(
        "Starting with events={} regions={}",
        config.events_path.display(),
        config.regions_path.display()
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1200.0, 700.0])
            .with_title("Olympics Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Olympics Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(OlympicsApp::new(cc, config)))),
    )
}
