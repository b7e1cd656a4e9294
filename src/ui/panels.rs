use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::dashboard::Section;
use crate::state::AppState;
use crate::ui::{heatmap, plot};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };
    if dataset.is_empty() {
        ui.label("The dataset has no rows.");
        return;
    }

    // ---- Time range ----
    ui.strong("Time range");
    let mut start = state.filters.start;
    let mut end = state.filters.end;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Start date");
        ui.add(DatePickerButton::new(&mut start).id_salt("start_date"));
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("End date");
        ui.add(DatePickerButton::new(&mut end).id_salt("end_date"));
    });
    state.set_date_range(start, end);
    if start > end {
        ui.label(RichText::new("Start date is after end date.").color(Color32::YELLOW));
    }
    ui.separator();

    // ---- Station multi-select ----
    let n_selected = state.filters.stations.len();
    let n_total = dataset.stations.len();
    ui.strong(format!("Stations  ({n_selected}/{n_total})"));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_stations();
        }
        if ui.small_button("None").clicked() {
            state.select_no_stations();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, true])
        .max_height((ui.available_height() - 40.0).max(60.0))
        .show(ui, |ui: &mut Ui| {
            for station in &dataset.stations {
                let mut checked = state.filters.stations.contains(station);
                let text = RichText::new(station).color(state.station_colors.color_for(station));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_station(station);
                }
            }
        });

    ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui: &mut Ui| {
        ui.small("Copyright © nf.muzakki 2025");
    });
}

// ---------------------------------------------------------------------------
// Central panel – the three dashboard sections
// ---------------------------------------------------------------------------

/// Render the dashboard body.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a data file to start  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("Air Quality Dashboard").size(26.0).strong());
            ui.add_space(8.0);

            ui.heading("Average PM2.5 by station");
            match &view.station_averages {
                Section::Chart(bars) => {
                    plot::station_bar_chart(ui, bars);
                    if let Some(summary) = &bars.summary {
                        ui.label(summary);
                    }
                }
                Section::Placeholder(msg) => {
                    ui.label(*msg);
                }
            }
            ui.add_space(16.0);

            ui.heading("Daily average PM2.5 by station");
            match &view.daily_trend {
                Section::Chart(trend) => plot::daily_trend_chart(ui, trend, &state.station_colors),
                Section::Placeholder(msg) => {
                    ui.label(*msg);
                }
            }
            ui.add_space(16.0);

            ui.heading("Correlation of weather factors with PM2.5");
            match &view.weather_correlation {
                Section::Chart(corr) => {
                    heatmap::correlation_heatmap(ui, &corr.matrix);
                    if let Some(summary) = &corr.summary {
                        ui.label(summary);
                    }
                }
                Section::Placeholder(msg) => {
                    ui.label(*msg);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(view)) = (&state.dataset, &state.view) {
            ui.label(format!(
                "{} measurements loaded, {} in range",
                ds.len(),
                view.rows_in_range
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open air-quality data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
