use thiserror::Error;

/// Domain failures raised while turning a file into an [`AirQualityDataset`].
///
/// I/O and decoder errors are not listed here; they travel as `anyhow` errors
/// with context attached at the call site.
///
/// `row` is 1-based: the file line for CSV (the header is line 1), the record
/// number for JSON and Parquet.
///
/// [`AirQualityDataset`]: super::model::AirQualityDataset
#[derive(Debug, Error)]
pub enum DataError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: cannot parse timestamp '{value}'")]
    BadTimestamp { row: usize, value: String },

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    BadNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: empty station identifier")]
    EmptyStation { row: usize },
}
