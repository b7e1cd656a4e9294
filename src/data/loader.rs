use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::timezone::Tz;
use arrow::array::{Array, Float64Array, Int64Array, StringArray, TimestampSecondArray};
use arrow::compute::kernels::cast::cast;
use arrow::datatypes::{DataType, TimeUnit};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::DataError;
use super::model::{AirQualityDataset, Measurement, Variable};

const TIME: &str = "time";
const STATION: &str = "station";
const TIME_PARTS: [&str; 4] = ["year", "month", "day", "hour"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an air-quality dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `time`, `station`, `PM2.5`, `TEMP`, `PRES`,
///                `DEWP`, `RAIN`, `WSPM` (recommended)
/// * `.json`    – `[{ "time": "...", "station": "...", "PM2.5": 12.0, ... }, ...]`
/// * `.parquet` – same columns; `time` may be a string or timestamp column.
///                A timezone-aware timestamp is read as wall-clock time in
///                its own zone.
///
/// In every format a missing `time` column is tolerated when `year`, `month`,
/// `day` and `hour` columns are present instead.
pub fn load_file(path: &Path) -> Result<AirQualityDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} measurements from {} ({} stations)",
        dataset.len(),
        path.display(),
        dataset.stations.len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Cell parsing shared by all formats
// ---------------------------------------------------------------------------

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse a timestamp cell. A bare date means midnight.
pub(crate) fn parse_timestamp(s: &str, row: usize) -> Result<NaiveDateTime, DataError> {
    let s = s.trim();
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(t);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| DataError::BadTimestamp {
            row,
            value: s.to_string(),
        })
}

/// Build a timestamp from separate `year`, `month`, `day`, `hour` cells.
fn timestamp_from_parts(parts: [i64; 4], row: usize) -> Result<NaiveDateTime, DataError> {
    let [year, month, day, hour] = parts;
    i32::try_from(year)
        .ok()
        .zip(u32::try_from(month).ok())
        .zip(u32::try_from(day).ok())
        .and_then(|((y, m), d)| NaiveDate::from_ymd_opt(y, m, d))
        .zip(u32::try_from(hour).ok())
        .and_then(|(date, h)| date.and_hms_opt(h, 0, 0))
        .ok_or_else(|| DataError::BadTimestamp {
            row,
            value: format!("{year}-{month}-{day} {hour}h"),
        })
}

/// Parse a numeric cell. Empty and NA-style markers are missing values.
pub(crate) fn parse_number(s: &str, row: usize, column: &str) -> Result<Option<f64>, DataError> {
    let t = s.trim();
    if t.is_empty() || matches!(t, "NA" | "N/A" | "null" | "None") {
        return Ok(None);
    }
    match t.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(DataError::BadNumber {
            row,
            column: column.to_string(),
            value: t.to_string(),
        }),
    }
}

fn parse_integer(s: &str, row: usize, column: &str) -> Result<i64, DataError> {
    s.trim().parse::<i64>().map_err(|_| DataError::BadNumber {
        row,
        column: column.to_string(),
        value: s.trim().to_string(),
    })
}

fn check_station(station: String, row: usize) -> Result<String, DataError> {
    if station.trim().is_empty() {
        Err(DataError::EmptyStation { row })
    } else {
        Ok(station)
    }
}

fn measurement(time: NaiveDateTime, station: String, values: [Option<f64>; 6]) -> Measurement {
    let [pm25, temp, pres, dewp, rain, wspm] = values;
    Measurement {
        time,
        station,
        pm25,
        temp,
        pres,
        dewp,
        rain,
        wspm,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Where the timestamp of a row comes from.
enum TimeColumns {
    Single(usize),
    Parts([usize; 4]),
}

/// CSV layout: header row with column names, one measurement per row.
/// Columns not used by the dashboard (other pollutants, wind direction…)
/// are ignored.
fn load_csv(path: &Path) -> Result<AirQualityDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let require = |name: &str| position(name).ok_or_else(|| DataError::MissingColumn(name.to_string()));

    let time_cols = match position(TIME) {
        Some(idx) => TimeColumns::Single(idx),
        None => {
            let mut idx = [0usize; 4];
            for (slot, name) in idx.iter_mut().zip(TIME_PARTS) {
                *slot = position(name).ok_or_else(|| DataError::MissingColumn(TIME.to_string()))?;
            }
            TimeColumns::Parts(idx)
        }
    };
    let station_idx = require(STATION)?;
    let mut var_idx = [0usize; 6];
    for (slot, var) in var_idx.iter_mut().zip(Variable::ALL) {
        *slot = require(var.header())?;
    }

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        // The header is line 1.
        let line = row_no + 2;
        let record = result.with_context(|| format!("CSV line {line}"))?;
        let line = record.position().map_or(line, |p| p.line() as usize);
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let time = match &time_cols {
            TimeColumns::Single(idx) => parse_timestamp(cell(*idx), line)?,
            TimeColumns::Parts(idx) => {
                let mut parts = [0i64; 4];
                for ((slot, &i), name) in parts.iter_mut().zip(idx).zip(TIME_PARTS) {
                    *slot = parse_integer(cell(i), line, name)?;
                }
                timestamp_from_parts(parts, line)?
            }
        };
        let station = check_station(cell(station_idx).to_string(), line)?;

        let mut values = [None; 6];
        for ((slot, &idx), var) in values.iter_mut().zip(&var_idx).zip(Variable::ALL) {
            *slot = parse_number(cell(idx), line, var.header())?;
        }

        records.push(measurement(time, station, values));
    }

    Ok(AirQualityDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`
/// after resetting the time index):
///
/// ```json
/// [
///   { "time": "2013-03-01 00:00:00", "station": "Dongsi",
///     "PM2.5": 9.0, "TEMP": -0.7, "PRES": 1023.0, "DEWP": -18.8,
///     "RAIN": 0.0, "WSPM": 4.4 },
///   ...
/// ]
/// ```
///
/// Numeric fields may be numbers, `null`, or strings (`"NA"` is missing).
fn load_json(path: &Path) -> Result<AirQualityDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, rec) in rows.iter().enumerate() {
        let i = i + 1;
        let obj = rec
            .as_object()
            .with_context(|| format!("Record {i} is not a JSON object"))?;

        let time = match obj.get(TIME) {
            Some(v) => parse_timestamp(&json_text(v), i)?,
            None => {
                let mut parts = [0i64; 4];
                for (slot, name) in parts.iter_mut().zip(TIME_PARTS) {
                    let v = obj
                        .get(name)
                        .ok_or_else(|| DataError::MissingColumn(TIME.to_string()))?;
                    *slot = match v.as_i64() {
                        Some(n) => n,
                        None => parse_integer(&json_text(v), i, name)?,
                    };
                }
                timestamp_from_parts(parts, i)?
            }
        };

        let station = obj
            .get(STATION)
            .map(json_text)
            .ok_or_else(|| DataError::MissingColumn(STATION.to_string()))?;
        let station = check_station(station, i)?;

        let mut values = [None; 6];
        for (slot, var) in values.iter_mut().zip(Variable::ALL) {
            *slot = json_number(obj, var.header(), i)?;
        }

        records.push(measurement(time, station, values));
    }

    Ok(AirQualityDataset::from_records(records))
}

fn json_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_number(obj: &Map<String, JsonValue>, key: &str, row: usize) -> Result<Option<f64>, DataError> {
    match obj.get(key) {
        None => Err(DataError::MissingColumn(key.to_string())),
        Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => Ok(n.as_f64()),
        Some(JsonValue::String(s)) => parse_number(s, row, key),
        Some(other) => Err(DataError::BadNumber {
            row,
            column: key.to_string(),
            value: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing air-quality measurements.
///
/// Expected schema:
/// - `time`: Utf8 (same formats as CSV), Timestamp or Date
///   (or `year`/`month`/`day`/`hour` integer columns)
/// - `station`: Utf8
/// - `PM2.5`, `TEMP`, `PRES`, `DEWP`, `RAIN`, `WSPM`: any numeric type, nullable
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<AirQualityDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = records.len();

        let times = batch_times(&batch, offset)?;
        let stations = column_as::<StringArray>(&batch, STATION, &DataType::Utf8)?;
        let mut value_cols = Vec::with_capacity(Variable::ALL.len());
        for var in Variable::ALL {
            value_cols.push(column_as::<Float64Array>(&batch, var.header(), &DataType::Float64)?);
        }

        for (row, time) in times.into_iter().enumerate() {
            let station = if stations.is_null(row) {
                String::new()
            } else {
                stations.value(row).to_string()
            };
            let station = check_station(station, offset + row + 1)?;

            let mut values = [None; 6];
            for (slot, col) in values.iter_mut().zip(&value_cols) {
                *slot = if col.is_null(row) || col.value(row).is_nan() {
                    None
                } else {
                    Some(col.value(row))
                };
            }

            records.push(measurement(time, station, values));
        }
    }

    Ok(AirQualityDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

/// Cast a named column to `target` and downcast to the concrete array type.
fn column_as<A: Array + Clone + 'static>(
    batch: &RecordBatch,
    name: &str,
    target: &DataType,
) -> Result<A> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DataError::MissingColumn(name.to_string()))?;
    let casted: Arc<dyn Array> = cast(batch.column(idx), target)
        .with_context(|| format!("casting column '{name}' to {target:?}"))?;
    casted
        .as_any()
        .downcast_ref::<A>()
        .cloned()
        .with_context(|| format!("column '{name}' has unexpected type after cast"))
}

/// Resolve the timestamp of every row in a batch.
fn batch_times(batch: &RecordBatch, offset: usize) -> Result<Vec<NaiveDateTime>> {
    let n_rows = batch.num_rows();
    let schema = batch.schema();

    let Ok(idx) = schema.index_of(TIME) else {
        let mut parts = Vec::with_capacity(TIME_PARTS.len());
        for name in TIME_PARTS {
            let col = column_as::<Int64Array>(batch, name, &DataType::Int64)
                .map_err(|_| DataError::MissingColumn(TIME.to_string()))?;
            parts.push(col);
        }
        return (0..n_rows)
            .map(|row| -> Result<NaiveDateTime> {
                let vals = [
                    parts[0].value(row),
                    parts[1].value(row),
                    parts[2].value(row),
                    parts[3].value(row),
                ];
                Ok(timestamp_from_parts(vals, offset + row + 1)?)
            })
            .collect();
    };

    match schema.field(idx).data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            let col = column_as::<StringArray>(batch, TIME, &DataType::Utf8)?;
            (0..n_rows)
                .map(|row| -> Result<NaiveDateTime> {
                    let text = if col.is_null(row) { "" } else { col.value(row) };
                    Ok(parse_timestamp(text, offset + row + 1)?)
                })
                .collect()
        }
        other => {
            // Keep the zone through the cast; dropping it would leave UTC values.
            let zone = match other {
                DataType::Timestamp(_, zone) => zone.clone(),
                _ => None,
            };
            let tz = zone
                .as_deref()
                .map(|z| z.parse::<Tz>().with_context(|| format!("unknown timezone '{z}'")))
                .transpose()?;
            let col = column_as::<TimestampSecondArray>(
                batch,
                TIME,
                &DataType::Timestamp(TimeUnit::Second, zone),
            )?;
            (0..n_rows)
                .map(|row| -> Result<NaiveDateTime> {
                    let bad = || DataError::BadTimestamp {
                        row: offset + row + 1,
                        value: "<null>".to_string(),
                    };
                    if col.is_null(row) {
                        return Err(bad().into());
                    }
                    let t = DateTime::from_timestamp(col.value(row), 0).ok_or_else(bad)?;
                    Ok(match &tz {
                        Some(tz) => t.with_timezone(tz).naive_local(),
                        None => t.naive_utc(),
                    })
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "No,year,month,day,hour,PM2.5,PM10,TEMP,PRES,DEWP,RAIN,wd,WSPM,station";

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_csv_with_time_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "aq.csv",
            "time,station,PM2.5,TEMP,PRES,DEWP,RAIN,WSPM\n\
             2013-03-01 01:00:00,Dongsi,12.5,-1.0,1023.0,-18.0,0.0,4.4\n\
             2013-03-01 00:00:00,Aotizhongxin,4.0,-0.7,1023.0,-18.8,0.0,4.4\n",
        );

        let ds = load_file(&path).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.stations, vec!["Dongsi", "Aotizhongxin"]);
        assert_eq!(ds.records[0].station, "Aotizhongxin");
        assert_eq!(ds.records[1].pm25, Some(12.5));
    }

    #[test]
    fn test_load_csv_assembles_time_from_parts_and_reads_na() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "raw.csv",
            &format!(
                "{HEADER}\n\
                 1,2013,3,1,0,NA,4,-0.7,1023,-18.8,0,NNW,4.4,Aotizhongxin\n\
                 2,2013,3,1,1,8,8,-1.1,1023.2,-18.2,0,N,4.7,Aotizhongxin\n"
            ),
        );

        let ds = load_file(&path).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].pm25, None);
        assert_eq!(ds.records[1].pm25, Some(8.0));
        assert_eq!(
            ds.records[1].time,
            NaiveDate::from_ymd_opt(2013, 3, 1)
                .unwrap()
                .and_hms_opt(1, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_missing_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.csv", "time,station,PM2.5\n2013-03-01,A,1\n");

        let err = load_file(&path).unwrap_err();
        let data_err = err.downcast_ref::<DataError>().unwrap();
        assert!(matches!(data_err, DataError::MissingColumn(c) if c == "TEMP"));
    }

    #[test]
    fn test_bad_timestamp_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "bad.csv",
            "time,station,PM2.5,TEMP,PRES,DEWP,RAIN,WSPM\nyesterday,A,1,1,1,1,1,1\n",
        );

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::BadTimestamp { row: 2, .. })
        ));
        assert!(format!("{err:#}").contains("row 2"));
    }

    #[test]
    fn test_csv_error_names_the_file_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "bad.csv",
            "time,station,PM2.5,TEMP,PRES,DEWP,RAIN,WSPM\n\
             2013-03-01 00:00:00,A,1,1,1,1,1,1\n\
             2013-03-01 01:00:00,A,1,1,1,1,1,1\n\
             2013-03-01 02:00:00,A,1,oops,1,1,1,1\n",
        );

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::BadNumber { row: 4, column, .. }) if column == "TEMP"
        ));
    }

    #[test]
    fn test_json_error_counts_records_from_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "bad.json",
            r#"[{"time": "2013-03-01", "station": " ", "PM2.5": 1, "TEMP": 1,
                 "PRES": 1, "DEWP": 1, "RAIN": 0, "WSPM": 1}]"#,
        );

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::EmptyStation { row: 1 })
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_file(Path::new("measurements.xlsx")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn test_load_json_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "aq.json",
            r#"[
                {"time": "2013-03-01 00:00:00", "station": "Dongsi", "PM2.5": 9.0,
                 "TEMP": -0.7, "PRES": 1023.0, "DEWP": -18.8, "RAIN": 0.0, "WSPM": "NA"},
                {"year": 2013, "month": 3, "day": 2, "hour": 5, "station": "Dongsi",
                 "PM2.5": null, "TEMP": 1, "PRES": 1020, "DEWP": -10, "RAIN": 0, "WSPM": 2.0}
            ]"#,
        );

        let ds = load_file(&path).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].wspm, None);
        assert_eq!(ds.records[1].pm25, None);
        assert_eq!(ds.records[1].temp, Some(1.0));
    }

    // -- Parquet --

    use crate::data::model::fixtures::at;
    use arrow::array::{ArrayRef, Int32Array, TimestampNanosecondArray};
    use parquet::arrow::ArrowWriter;

    fn write_parquet(dir: &tempfile::TempDir, name: &str, columns: Vec<(&str, ArrayRef)>) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let batch = RecordBatch::try_from_iter(columns).unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        path
    }

    /// `station` plus the six value columns for two rows.
    fn two_rows() -> Vec<(&'static str, ArrayRef)> {
        let f = |a: f64, b: f64| Arc::new(Float64Array::from(vec![a, b])) as ArrayRef;
        vec![
            ("station", Arc::new(StringArray::from(vec!["Dongsi", "Wanliu"])) as ArrayRef),
            ("PM2.5", f(10.0, 20.0)),
            ("TEMP", f(-1.0, 2.0)),
            ("PRES", f(1020.0, 1021.0)),
            ("DEWP", f(-10.0, -9.0)),
            ("RAIN", f(0.0, 0.5)),
            ("WSPM", f(1.5, 2.5)),
        ]
    }

    #[test]
    fn test_parquet_timestamp_column_with_nulls_nan_and_integers() {
        let dir = tempfile::tempdir().unwrap();
        let nanos = |date: &str, hour: u32| at(date, hour).and_utc().timestamp_nanos_opt().unwrap();
        let mut columns = two_rows();
        columns[1].1 = Arc::new(Float64Array::from(vec![f64::NAN, 20.0])) as ArrayRef;
        columns[5].1 = Arc::new(Int64Array::from(vec![Some(3), None])) as ArrayRef;
        columns.push((
            "time",
            Arc::new(TimestampNanosecondArray::from(vec![
                nanos("2017-03-02", 5),
                nanos("2017-03-01", 23),
            ])) as ArrayRef,
        ));
        let path = write_parquet(&dir, "aq.parquet", columns);

        let ds = load_file(&path).unwrap();

        assert_eq!(ds.len(), 2);
        // Sorted by time, so the Wanliu row comes first.
        assert_eq!(ds.records[0].time, at("2017-03-01", 23));
        assert_eq!(ds.records[0].station, "Wanliu");
        assert_eq!(ds.records[0].rain, None);
        assert_eq!(ds.records[0].pm25, Some(20.0));
        assert_eq!(ds.records[1].time, at("2017-03-02", 5));
        assert_eq!(ds.records[1].pm25, None, "NaN is a missing value");
        assert_eq!(ds.records[1].rain, Some(3.0));
    }

    #[test]
    fn test_parquet_string_time_column() {
        let dir = tempfile::tempdir().unwrap();
        let mut columns = two_rows();
        columns.push((
            "time",
            Arc::new(StringArray::from(vec!["2017-03-01 00:00:00", "2017-03-01"])) as ArrayRef,
        ));
        let path = write_parquet(&dir, "aq.parquet", columns);

        let ds = load_file(&path).unwrap();

        assert_eq!(ds.len(), 2);
        assert!(ds.records.iter().all(|m| m.time == at("2017-03-01", 0)));
        assert_eq!(ds.stations, vec!["Dongsi", "Wanliu"]);
    }

    #[test]
    fn test_parquet_time_from_integer_parts() {
        let dir = tempfile::tempdir().unwrap();
        let mut columns = two_rows();
        columns.push(("year", Arc::new(Int64Array::from(vec![2013, 2013])) as ArrayRef));
        columns.push(("month", Arc::new(Int32Array::from(vec![3, 3])) as ArrayRef));
        columns.push(("day", Arc::new(Int64Array::from(vec![1, 1])) as ArrayRef));
        columns.push(("hour", Arc::new(Int64Array::from(vec![7, 6])) as ArrayRef));
        let path = write_parquet(&dir, "raw.parquet", columns);

        let ds = load_file(&path).unwrap();

        assert_eq!(ds.records[0].time, at("2013-03-01", 6));
        assert_eq!(ds.records[0].station, "Wanliu");
        assert_eq!(ds.records[1].time, at("2013-03-01", 7));
    }

    #[test]
    fn test_parquet_bad_parts_report_one_based_row() {
        let dir = tempfile::tempdir().unwrap();
        let mut columns = two_rows();
        columns.push(("year", Arc::new(Int64Array::from(vec![2013, 2013])) as ArrayRef));
        columns.push(("month", Arc::new(Int64Array::from(vec![3, 13])) as ArrayRef));
        columns.push(("day", Arc::new(Int64Array::from(vec![1, 1])) as ArrayRef));
        columns.push(("hour", Arc::new(Int64Array::from(vec![0, 0])) as ArrayRef));
        let path = write_parquet(&dir, "raw.parquet", columns);

        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::BadTimestamp { row: 2, .. })
        ));
    }

    #[test]
    fn test_parquet_zoned_timestamps_keep_local_wall_clock() {
        let dir = tempfile::tempdir().unwrap();
        let utc = |date: &str, hour: u32| at(date, hour).and_utc().timestamp();
        let mut columns = two_rows();
        columns.push((
            "time",
            Arc::new(
                TimestampSecondArray::from(vec![utc("2017-03-01", 0), utc("2017-03-01", 20)])
                    .with_timezone("Asia/Shanghai"),
            ) as ArrayRef,
        ));
        let path = write_parquet(&dir, "zoned.parquet", columns);

        let ds = load_file(&path).unwrap();

        // Shanghai is UTC+8 year-round.
        assert_eq!(ds.records[0].time, at("2017-03-01", 8));
        assert_eq!(ds.records[1].time, at("2017-03-02", 4));
    }

    #[test]
    fn test_parse_number_markers() {
        assert_eq!(parse_number("", 0, "X").unwrap(), None);
        assert_eq!(parse_number("NA", 0, "X").unwrap(), None);
        assert_eq!(parse_number("nan", 0, "X").unwrap(), None);
        assert_eq!(parse_number(" 3.5 ", 0, "X").unwrap(), Some(3.5));
        assert!(parse_number("abc", 7, "X").is_err());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2014, 5, 6)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2014-05-06 07:00:00", 0).unwrap(), expected);
        assert_eq!(parse_timestamp("2014-05-06 07:00", 0).unwrap(), expected);
        assert_eq!(parse_timestamp("2014-05-06T07:00:00", 0).unwrap(), expected);
        assert_eq!(
            parse_timestamp("2014-05-06", 0).unwrap(),
            NaiveDate::from_ymd_opt(2014, 5, 6)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }
}
