use std::sync::Arc;

use arrow::array::{Float64Builder, StringArray, TimestampSecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const STATIONS: [&str; 12] = [
    "Aotizhongxin",
    "Changping",
    "Dingling",
    "Dongsi",
    "Guanyuan",
    "Gucheng",
    "Huairou",
    "Nongzhanguan",
    "Shunyi",
    "Tiantan",
    "Wanliu",
    "Wanshouxigong",
];

const DAYS: i64 = 120;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Row {
    time: NaiveDateTime,
    station: &'static str,
    /// PM2.5, TEMP, PRES, DEWP, RAIN, WSPM
    values: [Option<f64>; 6],
}

/// Hourly weather is shared by all stations; PM2.5 builds up under humid,
/// calm, high-pressure air and gets a fixed offset per station.
fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    let start = NaiveDate::from_ymd_opt(2016, 11, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid start date");

    let mut rows = Vec::new();
    let mut pm_state: f64 = 60.0;

    for h in 0..DAYS * 24 {
        let time = start + Duration::hours(h);
        let day = h as f64 / 24.0;
        let hour_phase = (h % 24) as f64 / 24.0 * 2.0 * std::f64::consts::PI;

        let temp = 5.0 - 8.0 * (day / DAYS as f64) + 4.0 * (hour_phase - 2.0).sin() + rng.gauss(0.0, 1.5);
        let pres = 1025.0 + 6.0 * (day / 9.0).sin() + rng.gauss(0.0, 1.0);
        let dewp = -12.0 + 6.0 * (day / 5.0).sin() + rng.gauss(0.0, 2.0);
        let wspm = (2.0 + 1.5 * (day / 3.0).cos() + rng.gauss(0.0, 0.8)).max(0.0);
        let rain = if rng.next_f64() < 0.02 { rng.next_f64() * 3.0 } else { 0.0 };

        pm_state = (0.9 * pm_state + 0.1 * (80.0 + 6.0 * dewp + 2.0 * (pres - 1025.0) - 15.0 * wspm)
            + rng.gauss(0.0, 6.0))
        .max(3.0);

        for (s, &station) in STATIONS.iter().enumerate() {
            let offset = (s as f64 - 5.5) * 4.0;
            let pm25 = (pm_state + offset + rng.gauss(0.0, 5.0)).max(2.0);
            // Roughly 1% of PM2.5 readings are missing, as in real station feeds.
            let pm25 = (rng.next_f64() > 0.01).then_some(pm25);
            rows.push(Row {
                time,
                station,
                values: [pm25, Some(temp), Some(pres), Some(dewp), Some(rain), Some(wspm)],
            });
        }
    }
    rows
}

const VALUE_COLUMNS: [&str; 6] = ["PM2.5", "TEMP", "PRES", "DEWP", "RAIN", "WSPM"];

/// One CSV line; `None` is written as an empty cell.
#[derive(Serialize)]
struct CsvRow<'a> {
    time: String,
    station: &'a str,
    #[serde(rename = "PM2.5")]
    pm25: Option<f64>,
    #[serde(rename = "TEMP")]
    temp: Option<f64>,
    #[serde(rename = "PRES")]
    pres: Option<f64>,
    #[serde(rename = "DEWP")]
    dewp: Option<f64>,
    #[serde(rename = "RAIN")]
    rain: Option<f64>,
    #[serde(rename = "WSPM")]
    wspm: Option<f64>,
}

fn round1(v: Option<f64>) -> Option<f64> {
    v.map(|v| (v * 10.0).round() / 10.0)
}

fn write_csv(rows: &[Row], path: &str) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        let [pm25, temp, pres, dewp, rain, wspm] = row.values.map(round1);
        writer.serialize(CsvRow {
            time: row.time.format("%Y-%m-%d %H:%M:%S").to_string(),
            station: row.station,
            pm25,
            temp,
            pres,
            dewp,
            rain,
            wspm,
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> anyhow::Result<()> {
    let times = TimestampSecondArray::from(
        rows.iter()
            .map(|r| r.time.and_utc().timestamp())
            .collect::<Vec<_>>(),
    );
    let stations = StringArray::from(rows.iter().map(|r| r.station).collect::<Vec<_>>());

    let mut value_arrays = Vec::with_capacity(6);
    for col in 0..6 {
        let mut builder = Float64Builder::with_capacity(rows.len());
        for row in rows {
            builder.append_option(row.values[col]);
        }
        value_arrays.push(builder.finish());
    }

    let mut fields = vec![
        Field::new("time", DataType::Timestamp(TimeUnit::Second, None), false),
        Field::new("station", DataType::Utf8, false),
    ];
    fields.extend(
        VALUE_COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Float64, true)),
    );
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<arrow::array::ArrayRef> = vec![Arc::new(times), Arc::new(stations)];
    columns.extend(value_arrays.into_iter().map(|a| Arc::new(a) as arrow::array::ArrayRef));

    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "air_quality.csv")?;
    write_parquet(&rows, "air_quality.parquet")?;

    println!(
        "Wrote {} measurements ({} stations, {DAYS} days) to air_quality.csv and air_quality.parquet",
        rows.len(),
        STATIONS.len()
    );
    Ok(())
}
