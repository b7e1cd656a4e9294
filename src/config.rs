use std::path::PathBuf;

use clap::Parser;

/// Interactive air-quality dashboard.
#[derive(Debug, Clone, Parser)]
#[command(name = "aqdash", version, about)]
pub struct Config {
    /// Data file to open at startup (.csv, .json or .parquet)
    #[arg(env = "AQDASH_DATA", default_value = "air_quality.csv")]
    pub data: PathBuf,

    /// Initial window width in points
    #[arg(long, default_value_t = 1200.0)]
    pub width: f32,

    /// Initial window height in points
    #[arg(long, default_value_t = 850.0)]
    pub height: f32,
}
