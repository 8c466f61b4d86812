//! Command-line parsing for the auction fetcher.
//!
//! Parsing is kept apart from fetching/normalization so the pipeline can be
//! driven from tests without touching argv.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

/// Top-level CLI.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "auctions",
    version,
    about = "Fetch completed government bond auction data."
)]
pub struct Cli {
    /// Country code (supported: us).
    #[arg(long)]
    pub country: String,

    /// Start date, inclusive (YYYY-MM-DD).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub start: NaiveDate,

    /// End date, inclusive (YYYY-MM-DD).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub end: NaiveDate,

    /// Comma-separated tenors to include, e.g. 6m,1y,5y,10y. Default: all.
    #[arg(long, default_value = "")]
    pub tenors: String,

    /// Output CSV path (default: auctions_<country>.csv, country as typed).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

impl Cli {
    /// Output path, falling back to `auctions_<country>.csv` with the country
    /// spelled as the user typed it.
    pub fn output_path(&self) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("auctions_{}.csv", self.country.trim())))
    }
}
