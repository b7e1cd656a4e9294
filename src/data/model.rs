use std::collections::HashSet;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

// ---------------------------------------------------------------------------
// Variable – the numeric columns of an air-quality record
// ---------------------------------------------------------------------------

/// The six numeric columns used by the dashboard, in display order.
/// PM2.5 always comes first; the rest are weather covariates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    Pm25,
    Temp,
    Pres,
    Dewp,
    Rain,
    Wspm,
}

impl Variable {
    pub const ALL: [Variable; 6] = [
        Variable::Pm25,
        Variable::Temp,
        Variable::Pres,
        Variable::Dewp,
        Variable::Rain,
        Variable::Wspm,
    ];

    /// Column name as it appears in the source header.
    pub fn header(self) -> &'static str {
        match self {
            Variable::Pm25 => "PM2.5",
            Variable::Temp => "TEMP",
            Variable::Pres => "PRES",
            Variable::Dewp => "DEWP",
            Variable::Rain => "RAIN",
            Variable::Wspm => "WSPM",
        }
    }

    /// Human readable name used in sentences.
    pub fn label(self) -> &'static str {
        match self {
            Variable::Pm25 => "PM2.5",
            Variable::Temp => "temperature (TEMP)",
            Variable::Pres => "pressure (PRES)",
            Variable::Dewp => "dew point (DEWP)",
            Variable::Rain => "rainfall (RAIN)",
            Variable::Wspm => "wind speed (WSPM)",
        }
    }

    /// Position of this variable in [`Variable::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// Measurement – one row of the source table
// ---------------------------------------------------------------------------

/// A single hourly observation at one station.
/// Missing cells are `None` and are skipped by every aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub time: NaiveDateTime,
    pub station: String,
    pub pm25: Option<f64>,
    pub temp: Option<f64>,
    pub pres: Option<f64>,
    pub dewp: Option<f64>,
    pub rain: Option<f64>,
    pub wspm: Option<f64>,
}

impl Measurement {
    pub fn value(&self, var: Variable) -> Option<f64> {
        match var {
            Variable::Pm25 => self.pm25,
            Variable::Temp => self.temp,
            Variable::Pres => self.pres,
            Variable::Dewp => self.dewp,
            Variable::Rain => self.rain,
            Variable::Wspm => self.wspm,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.time.date()
    }
}

// ---------------------------------------------------------------------------
// AirQualityDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded table, indexed by time.
#[derive(Debug, Clone, Default)]
pub struct AirQualityDataset {
    /// All rows, sorted ascending by `time`.
    pub records: Vec<Measurement>,
    /// Station identifiers in order of first appearance in the source file.
    pub stations: Vec<String>,
}

impl AirQualityDataset {
    /// Build the time index and the station list from raw rows.
    pub fn from_records(mut records: Vec<Measurement>) -> Self {
        let mut seen = HashSet::new();
        let stations: Vec<String> = records
            .iter()
            .filter(|m| seen.insert(m.station.as_str()))
            .map(|m| m.station.clone())
            .collect();

        // Stable sort keeps source order within identical timestamps.
        records.sort_by_key(|m| m.time);

        AirQualityDataset { records, stations }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(Measurement::date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(Measurement::date)
    }

    /// Inclusive span of calendar dates covered by the data.
    pub fn time_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.first_date()?, self.last_date()?))
    }
}
