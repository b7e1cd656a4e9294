/// Data layer: core types, loading, caching and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐      ┌──────────────┐
///   │  loader  │ ───▶ │ DatasetCache │  memoized by path + mtime
///   └──────────┘      └──────────────┘
///        │
///        ▼
///   ┌───────────────────┐
///   │ AirQualityDataset │  Vec<Measurement> sorted by time, station list
///   └───────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  date range + station set → row indices
///   └──────────┘
/// ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
