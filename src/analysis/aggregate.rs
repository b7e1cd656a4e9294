use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::data::model::AirQualityDataset;

/// Running sum/count for an arithmetic mean that skips missing values.
#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, v: Option<f64>) {
        if let Some(v) = v {
            self.sum += v;
            self.count += 1;
        }
    }

    fn value(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

// ---------------------------------------------------------------------------
// Per-station mean
// ---------------------------------------------------------------------------

/// Mean PM2.5 of one station over the selected rows.
#[derive(Debug, Clone, PartialEq)]
pub struct StationMean {
    pub station: String,
    pub mean: f64,
    /// Number of non-missing PM2.5 values that went into `mean`.
    pub samples: usize,
}

/// Mean PM2.5 per station, sorted ascending (lowest first).
/// Stations without any PM2.5 value in `indices` are left out.
pub fn station_means(dataset: &AirQualityDataset, indices: &[usize]) -> Vec<StationMean> {
    let mut acc: HashMap<&str, Mean> = HashMap::new();
    for &i in indices {
        let m = &dataset.records[i];
        acc.entry(m.station.as_str()).or_default().push(m.pm25);
    }

    // Walk stations in dataset order so ties keep a stable order.
    let mut means: Vec<StationMean> = dataset
        .stations
        .iter()
        .filter_map(|station| {
            let mean = acc.get(station.as_str())?;
            Some(StationMean {
                station: station.clone(),
                mean: mean.value()?,
                samples: mean.count,
            })
        })
        .collect();

    means.sort_by(|a, b| a.mean.total_cmp(&b.mean));
    means
}

/// Station with the largest mean.
pub fn highest_station(means: &[StationMean]) -> Option<&StationMean> {
    means.iter().max_by(|a, b| a.mean.total_cmp(&b.mean))
}

// ---------------------------------------------------------------------------
// Per-station, per-day mean
// ---------------------------------------------------------------------------

/// One point of a daily series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyMean {
    pub date: NaiveDate,
    pub mean: f64,
}

/// Daily mean PM2.5 of one station, ordered by date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    pub station: String,
    pub points: Vec<DailyMean>,
}

/// Group the selected rows by station and calendar day.
/// Series follow dataset station order; days with no PM2.5 value are absent.
pub fn daily_means(dataset: &AirQualityDataset, indices: &[usize]) -> Vec<DailySeries> {
    let mut acc: HashMap<&str, BTreeMap<NaiveDate, Mean>> = HashMap::new();
    for &i in indices {
        let m = &dataset.records[i];
        acc.entry(m.station.as_str())
            .or_default()
            .entry(m.date())
            .or_default()
            .push(m.pm25);
    }

    dataset
        .stations
        .iter()
        .filter_map(|station| {
            let days = acc.get(station.as_str())?;
            let points: Vec<DailyMean> = days
                .iter()
                .filter_map(|(&date, mean)| Some(DailyMean { date, mean: mean.value()? }))
                .collect();
            (!points.is_empty()).then(|| DailySeries {
                station: station.clone(),
                points,
            })
        })
        .collect()
}
