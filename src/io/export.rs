//! Export the normalized auction table to CSV.
//!
//! Header is the canonical column list; null cells are written empty so the
//! file loads cleanly in spreadsheets and dataframe libraries.

use std::path::Path;

use crate::domain::AuctionTable;
use crate::error::AppError;

pub fn write_auctions_csv(path: &Path, table: &AuctionTable) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::usage(format!("Failed to create output CSV '{}': {e}", path.display())))?;

    writer
        .write_record(table.columns())
        .map_err(|e| AppError::usage(format!("Failed to write output CSV header: {e}")))?;

    for record in table {
        let row: Vec<String> = record.to_row().into_iter().map(Option::unwrap_or_default).collect();
        writer
            .write_record(&row)
            .map_err(|e| AppError::usage(format!("Failed to write output CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::usage(format!("Failed to flush output CSV '{}': {e}", path.display())))?;

    Ok(())
}
