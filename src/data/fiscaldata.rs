//! US Treasury Fiscal Data integration (`auctions_query` dataset).

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::FiscalDataConfig;
use crate::data::normalize::{REQUESTED_FIELDS, RawAuctionRow, normalize_rows};
use crate::data::{AuctionQuery, AuctionSource};
use crate::domain::AuctionTable;
use crate::error::AppError;

pub struct FiscalDataClient {
    client: Client,
    config: FiscalDataConfig,
}

#[derive(Debug, Deserialize)]
struct AuctionsResponse {
    #[serde(default)]
    data: Vec<RawAuctionRow>,
    #[serde(default)]
    meta: Option<ResponseMeta>,
}

#[derive(Debug, Deserialize)]
struct ResponseMeta {
    #[serde(rename = "total-count", default)]
    total_count: Option<u64>,
}

impl FiscalDataClient {
    pub fn new(config: FiscalDataConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::upstream(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Query parameters for one bounded request over `[start, end]`.
    pub fn query_params(&self, start: NaiveDate, end: NaiveDate) -> Vec<(&'static str, String)> {
        vec![
            ("fields", REQUESTED_FIELDS.join(",")),
            (
                "filter",
                format!(
                    "auction_date:gte:{},auction_date:lte:{}",
                    start.format("%Y-%m-%d"),
                    end.format("%Y-%m-%d")
                ),
            ),
            ("sort", "-auction_date".to_string()),
            ("page[size]", self.config.page_size.to_string()),
        ]
    }

    fn fetch_rows(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawAuctionRow>, AppError> {
        let url = self.config.auctions_url();
        debug!(%url, %start, %end, page_size = self.config.page_size, "requesting auctions");

        let resp = self
            .client
            .get(&url)
            .query(&self.query_params(start, end))
            .send()
            .map_err(|e| AppError::upstream(format!("Fiscal Data request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::upstream(format!(
                "Fiscal Data request failed with status {}.",
                resp.status()
            )));
        }

        let body: AuctionsResponse = resp
            .json()
            .map_err(|e| AppError::upstream(format!("Failed to parse Fiscal Data response: {e}")))?;

        let returned = body.data.len();
        let total = body.meta.and_then(|m| m.total_count);
        if let Some(missing) = rows_beyond_page(total, returned) {
            warn!(
                missing,
                returned,
                page_size = self.config.page_size,
                "result set exceeds page size; extra rows were not fetched"
            );
        }
        info!(rows = returned, "fetched auctions");

        Ok(body.data)
    }
}

/// Rows the provider reported but did not return in the single page.
fn rows_beyond_page(total_count: Option<u64>, returned: usize) -> Option<u64> {
    total_count
        .and_then(|total| total.checked_sub(returned as u64))
        .filter(|missing| *missing > 0)
}

impl AuctionSource for FiscalDataClient {
    fn country(&self) -> &'static str {
        "us"
    }

    fn name(&self) -> &'static str {
        "US Treasury Fiscal Data"
    }

    fn fetch(&self, query: &AuctionQuery) -> Result<AuctionTable, AppError> {
        let rows = self.fetch_rows(query.start, query.end)?;
        Ok(normalize_rows(&rows, query.tenors.as_ref()))
    }
}
