use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};

use super::model::AirQualityDataset;

// ---------------------------------------------------------------------------
// Filter predicate: date range + selected stations
// ---------------------------------------------------------------------------

/// Current sidebar selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// First calendar day included.
    pub start: NaiveDate,
    /// Last calendar day included (the whole day counts).
    pub end: NaiveDate,
    /// Stations shown in the daily series. An empty set shows nothing.
    pub stations: BTreeSet<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self {
            start: today,
            end: today,
            stations: BTreeSet::new(),
        }
    }
}

/// Initialise a [`FilterState`] spanning the whole dataset with every station selected.
///
/// An empty dataset gets today as both bounds. The date picker does calendar
/// arithmetic around the current value, so the range must stay far from
/// `NaiveDate::MIN`/`MAX`.
pub fn init_filter_state(dataset: &AirQualityDataset) -> FilterState {
    let today = Local::now().date_naive();
    let (start, end) = dataset.time_span().unwrap_or((today, today));
    FilterState {
        start,
        end,
        stations: dataset.stations.iter().cloned().collect(),
    }
}

/// Return indices of rows whose date lies in `[start, end]`.
///
/// Rows are sorted by time, so the selection is one contiguous run found by
/// binary search. `start > end` selects nothing. Every reading of the end day
/// is included, not only its midnight one.
pub fn time_filtered_indices(dataset: &AirQualityDataset, start: NaiveDate, end: NaiveDate) -> Vec<usize> {
    if start > end {
        return Vec::new();
    }
    let records = &dataset.records;
    let lo = records.partition_point(|m| m.date() < start);
    let hi = records.partition_point(|m| m.date() <= end);
    (lo..hi.max(lo)).collect()
}

/// Keep only the indices whose station is selected.
pub fn station_filtered_indices(
    dataset: &AirQualityDataset,
    indices: &[usize],
    stations: &BTreeSet<String>,
) -> Vec<usize> {
    indices
        .iter()
        .copied()
        .filter(|&i| stations.contains(&dataset.records[i].station))
        .collect()
}
