//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the country to a data source
//! - fetches and normalizes auctions
//! - writes the CSV and prints a preview

use std::io::Write;

use clap::Parser;
use tracing::info;

use crate::cli::Cli;
use crate::config::FiscalDataConfig;
use crate::data::{AuctionQuery, AuctionSource, SourceRegistry};
use crate::domain::TenorFilter;
use crate::error::AppError;
use crate::report::{PREVIEW_ROWS, format_preview, format_saved_summary};

pub mod pipeline;

/// Entry point for the `auctions` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    run_with(cli)
}

pub fn run_with(cli: Cli) -> Result<(), AppError> {
    // Fail on the country before loading config or touching the network.
    let country = SourceRegistry::canonical_country(&cli.country)?;

    let registry = SourceRegistry::new(FiscalDataConfig::from_env()?);
    let source = registry.resolve(&country)?;

    let stdout = std::io::stdout();
    run_query(&cli, source.as_ref(), &mut stdout.lock())
}

/// Fetch through `source`, then either report "no rows" or write the CSV and
/// print the preview plus summary to `out`.
pub fn run_query(cli: &Cli, source: &dyn AuctionSource, out: &mut impl Write) -> Result<(), AppError> {
    let query = AuctionQuery {
        start: cli.start,
        end: cli.end,
        tenors: TenorFilter::parse(&cli.tenors),
    };
    let table = pipeline::fetch_auctions(source, &query)?;

    if table.is_empty() {
        writeln!(out, "No rows returned for the selected filters.").map_err(console_error)?;
        return Ok(());
    }

    let out_path = cli.output_path();
    crate::io::write_auctions_csv(&out_path, &table)?;
    info!(path = %out_path.display(), rows = table.len(), "wrote auctions CSV");

    write!(out, "{}", format_preview(&table, PREVIEW_ROWS)).map_err(console_error)?;
    writeln!(out).map_err(console_error)?;
    writeln!(out, "{}", format_saved_summary(table.len(), &out_path)).map_err(console_error)?;

    Ok(())
}

fn console_error(e: std::io::Error) -> AppError {
    AppError::usage(format!("Failed to write console output: {e}"))
}
