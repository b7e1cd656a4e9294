use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AqDashApp {
    pub state: AppState,
}

impl AqDashApp {
    /// Create the app and load the configured data file, if it exists.
    pub fn new(config: &Config) -> Self {
        let mut state = AppState::default();
        if config.data.exists() {
            state.open_path(&config.data);
        } else {
            log::warn!("Data file {} not found", config.data.display());
            state.status_message = Some(format!(
                "{} not found. Use File → Open… to pick a dataset.",
                config.data.display()
            ));
        }
        Self { state }
    }
}

impl eframe::App for AqDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard sections ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::dashboard(ui, &self.state);
        });
    }
}
