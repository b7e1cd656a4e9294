use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::color::StationColors;
use crate::dashboard::DashboardView;
use crate::data::cache::DatasetCache;
use crate::data::filter::{init_filter_state, FilterState};
use crate::data::model::AirQualityDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<AirQualityDataset>>,

    /// File the current dataset came from.
    pub source: Option<PathBuf>,

    /// Parsed files, reused when the same file is opened again.
    pub cache: DatasetCache,

    /// Sidebar selection.
    pub filters: FilterState,

    /// Aggregates for the current selection (cached until the filters change).
    pub view: Option<DashboardView>,

    /// Colour per station, fixed for the lifetime of a dataset.
    pub station_colors: StationColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load `path` through the cache and make it the current dataset.
    /// Failures are logged and surfaced in `status_message`.
    pub fn open_path(&mut self, path: &Path) {
        match self.cache.get_or_load(path) {
            Ok(dataset) => {
                log::debug!("{} dataset(s) cached", self.cache.len());
                self.source = Some(path.to_path_buf());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Re-read the current file from disk, bypassing the cache.
    pub fn reload(&mut self) {
        let Some(path) = self.source.clone() else {
            return;
        };
        self.cache.invalidate(&path);
        self.open_path(&path);
    }

    /// Ingest a newly loaded dataset, reset filters and colours.
    pub fn set_dataset(&mut self, dataset: Arc<AirQualityDataset>) {
        if let Some((first, last)) = dataset.time_span() {
            log::info!(
                "Dataset spans {first} to {last}, stations: {:?}",
                dataset.stations
            );
        }
        self.filters = init_filter_state(&dataset);
        self.station_colors = StationColors::new(&dataset.stations);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the dashboard after a filter change.
    pub fn refilter(&mut self) {
        self.view = self
            .dataset
            .as_deref()
            .map(|ds| DashboardView::compute(ds, &self.filters));
    }

    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        if self.filters.start == start && self.filters.end == end {
            return;
        }
        self.filters.start = start;
        self.filters.end = end;
        self.refilter();
    }

    /// Toggle a single station in the multi-select.
    pub fn toggle_station(&mut self, station: &str) {
        if !self.filters.stations.remove(station) {
            self.filters.stations.insert(station.to_string());
        }
        self.refilter();
    }

    pub fn select_all_stations(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filters.stations = ds.stations.iter().cloned().collect();
            self.refilter();
        }
    }

    pub fn select_no_stations(&mut self) {
        self.filters.stations.clear();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::pm;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(Arc::new(AirQualityDataset::from_records(vec![
            pm("2017-01-01", 0, "Dongsi", Some(10.0)),
            pm("2017-01-05", 0, "Wanliu", Some(20.0)),
        ])));
        state
    }

    #[test]
    fn test_set_dataset_computes_view() {
        let state = loaded();
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.rows_in_range, 2);
        assert_eq!(state.filters.stations.len(), 2);
    }

    #[test]
    fn test_date_change_recomputes() {
        let mut state = loaded();
        let day = NaiveDate::from_ymd_opt(2017, 1, 5).unwrap();
        state.set_date_range(day, day);
        assert_eq!(state.view.as_ref().unwrap().rows_in_range, 1);
    }

    #[test]
    fn test_station_toggles() {
        let mut state = loaded();
        state.toggle_station("Dongsi");
        assert!(!state.filters.stations.contains("Dongsi"));
        state.toggle_station("Dongsi");
        assert!(state.filters.stations.contains("Dongsi"));

        state.select_no_stations();
        assert!(state.filters.stations.is_empty());
        state.select_all_stations();
        assert_eq!(state.filters.stations.len(), 2);
    }

    #[test]
    fn test_failed_open_keeps_running_without_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.open_path(&dir.path().join("missing.csv"));

        assert!(state.dataset.is_none());
        assert!(state.view.is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
    }
}
