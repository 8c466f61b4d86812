//! Front-end independent fetch pipeline.
//!
//! source resolution -> bounded fetch + normalization -> table
//!
//! `app::run` owns argv and printing; this module only moves data so it can be
//! exercised with a fake `AuctionSource`.

use tracing::{info, warn};

use crate::data::{AuctionQuery, AuctionSource};
use crate::domain::AuctionTable;
use crate::error::AppError;

pub fn fetch_auctions(source: &dyn AuctionSource, query: &AuctionQuery) -> Result<AuctionTable, AppError> {
    if query.start > query.end {
        warn!(start = %query.start, end = %query.end, "start date is after end date; expect no rows");
    }
    if let Some(filter) = &query.tenors {
        let labels: Vec<&str> = filter.labels().collect();
        info!(tenors = ?labels, "applying tenor filter");
    }

    let table = source.fetch(query)?;
    info!(
        country = source.country(),
        source = source.name(),
        rows = table.len(),
        "normalized auctions"
    );
    Ok(table)
}
