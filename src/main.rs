mod analysis;
mod app;
mod color;
mod config;
mod dashboard;
mod data;
mod state;
mod ui;

use app::AqDashApp;
use clap::Parser;
use config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::parse();
    log::debug!("{config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width, config.height])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Air Quality Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(AqDashApp::new(&config)))),
    )
}
