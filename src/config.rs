//! Source configuration.
//!
//! Values come from the process environment (optionally seeded from `.env`):
//!
//! - `FISCALDATA_BASE_URL`     API root, without the dataset path
//! - `FISCALDATA_PAGE_SIZE`    rows requested in the single page (default 10000)
//! - `FISCALDATA_TIMEOUT_SECS` request timeout in seconds (default 60)

use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://api.fiscaldata.treasury.gov/services/api/fiscal_service";
pub const AUCTIONS_ENDPOINT: &str = "/v1/accounting/od/auctions_query";
pub const DEFAULT_PAGE_SIZE: usize = 10_000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiscalDataConfig {
    pub base_url: String,
    pub page_size: usize,
    pub timeout: Duration,
}

impl Default for FiscalDataConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FiscalDataConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (unset and blank values fall back to defaults).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::default();
        if let Some(url) = get("FISCALDATA_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = get("FISCALDATA_PAGE_SIZE") {
            config.page_size = parse_positive("FISCALDATA_PAGE_SIZE", &raw)? as usize;
        }
        if let Some(raw) = get("FISCALDATA_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_positive("FISCALDATA_TIMEOUT_SECS", &raw)?);
        }
        Ok(config)
    }

    pub fn auctions_url(&self) -> String {
        format!("{}{}", self.base_url, AUCTIONS_ENDPOINT)
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<u64, AppError> {
    match raw.parse::<u64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(AppError::usage(format!(
            "Invalid {key}='{raw}': expected a positive integer."
        ))),
    }
}
