use crate::analysis::aggregate::{
    daily_means, highest_station, station_means, DailySeries, StationMean,
};
use crate::analysis::correlation::{correlation_matrix, most_correlated_factor, CorrelationMatrix};
use crate::data::filter::{station_filtered_indices, time_filtered_indices, FilterState};
use crate::data::model::AirQualityDataset;

pub const NO_DATA_IN_RANGE: &str = "No data in the selected time range.";
pub const NO_DATA_FOR_STATIONS: &str = "No data for the selected stations.";

// ---------------------------------------------------------------------------
// Section outcome
// ---------------------------------------------------------------------------

/// What one dashboard section shows: a chart, or a fixed message when the
/// selection is empty.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Chart(T),
    Placeholder(&'static str),
}

impl<T> Section<T> {
    pub fn chart(&self) -> Option<&T> {
        match self {
            Section::Chart(t) => Some(t),
            Section::Placeholder(_) => None,
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Section::Chart(_) => None,
            Section::Placeholder(msg) => Some(*msg),
        }
    }
}

// ---------------------------------------------------------------------------
// Section payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct StationAverages {
    /// Ascending by mean, so the highest bar is drawn last (on top).
    pub means: Vec<StationMean>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyTrend {
    pub series: Vec<DailySeries>,
    pub show_legend: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCorrelation {
    pub matrix: CorrelationMatrix,
    pub summary: Option<String>,
}

/// Everything the central panel renders for one filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Rows inside the date range.
    pub rows_in_range: usize,
    pub station_averages: Section<StationAverages>,
    pub daily_trend: Section<DailyTrend>,
    pub weather_correlation: Section<WeatherCorrelation>,
}

impl DashboardView {
    /// Run every aggregate for the given selection.
    ///
    /// The date range applies to all three sections; the station selection
    /// narrows only the daily trend.
    pub fn compute(dataset: &AirQualityDataset, filters: &FilterState) -> Self {
        let in_range = time_filtered_indices(dataset, filters.start, filters.end);
        log::debug!(
            "Recomputing dashboard for {}..={} ({} rows, {} stations selected)",
            filters.start,
            filters.end,
            in_range.len(),
            filters.stations.len()
        );

        if in_range.is_empty() {
            return DashboardView {
                rows_in_range: 0,
                station_averages: Section::Placeholder(NO_DATA_IN_RANGE),
                daily_trend: Section::Placeholder(NO_DATA_IN_RANGE),
                weather_correlation: Section::Placeholder(NO_DATA_IN_RANGE),
            };
        }

        let means = station_means(dataset, &in_range);
        let summary = highest_station(&means).map(highest_station_sentence);
        let station_averages = Section::Chart(StationAverages { means, summary });

        let selected = station_filtered_indices(dataset, &in_range, &filters.stations);
        let daily_trend = if selected.is_empty() {
            Section::Placeholder(NO_DATA_FOR_STATIONS)
        } else {
            Section::Chart(DailyTrend {
                series: daily_means(dataset, &selected),
                show_legend: filters.stations.len() > 1,
            })
        };

        let matrix = correlation_matrix(dataset, &in_range);
        let summary = most_correlated_factor(&matrix).map(|(var, r)| factor_sentence(var.label(), r));
        let weather_correlation = Section::Chart(WeatherCorrelation { matrix, summary });

        DashboardView {
            rows_in_range: in_range.len(),
            station_averages,
            daily_trend,
            weather_correlation,
        }
    }
}

pub fn highest_station_sentence(top: &StationMean) -> String {
    format!(
        "The station with the highest PM2.5 over the selected period is {} with an average of {:.1} µg/m³.",
        top.station, top.mean
    )
}

pub fn factor_sentence(label: &str, r: f64) -> String {
    format!("The weather factor most correlated with PM2.5 is {label} (r = {r:.2}).")
}
