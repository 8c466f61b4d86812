//! Auction data sources.
//!
//! A source takes a date range (and an optional tenor filter) and returns a
//! normalized `AuctionTable`. Sources are looked up by country code through
//! `SourceRegistry`; only the US Treasury source exists today.

use chrono::NaiveDate;

use crate::config::FiscalDataConfig;
use crate::domain::{AuctionTable, TenorFilter};
use crate::error::AppError;

pub mod fiscaldata;
pub mod normalize;

pub use fiscaldata::FiscalDataClient;
pub use normalize::{RawAuctionRow, normalize_rows};

/// Inclusive date range plus optional tenor filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub tenors: Option<TenorFilter>,
}

/// A country-specific auction data source.
pub trait AuctionSource {
    /// Lower-case country code this source serves.
    fn country(&self) -> &'static str;

    /// Human-readable provider name for logs.
    fn name(&self) -> &'static str;

    /// Run one bounded fetch and return the normalized table.
    fn fetch(&self, query: &AuctionQuery) -> Result<AuctionTable, AppError>;
}

/// Country codes with a registered source.
pub const SUPPORTED_COUNTRIES: &[&str] = &["us"];

/// Maps country codes to sources.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    fiscaldata: FiscalDataConfig,
}

impl SourceRegistry {
    pub fn new(fiscaldata: FiscalDataConfig) -> Self {
        Self { fiscaldata }
    }

    /// Supported codes, sorted.
    pub fn supported() -> Vec<&'static str> {
        let mut codes = SUPPORTED_COUNTRIES.to_vec();
        codes.sort_unstable();
        codes
    }

    /// Check a country code (case-insensitive) and return its canonical form.
    pub fn canonical_country(country: &str) -> Result<String, AppError> {
        let code = country.trim().to_lowercase();
        if SUPPORTED_COUNTRIES.contains(&code.as_str()) {
            Ok(code)
        } else {
            Err(AppError::usage(format!(
                "Country '{code}' is not yet implemented. Supported: {}",
                Self::supported().join(", ")
            )))
        }
    }

    pub fn resolve(&self, country: &str) -> Result<Box<dyn AuctionSource>, AppError> {
        match Self::canonical_country(country)?.as_str() {
            "us" => Ok(Box::new(FiscalDataClient::new(self.fiscaldata.clone())?)),
            other => Err(AppError::usage(format!("No source registered for '{other}'."))),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;

    use super::*;

    /// Serves a canned `data` array instead of calling the network.
    pub(crate) struct CannedSource {
        rows: Vec<RawAuctionRow>,
        pub(crate) calls: Cell<usize>,
    }

    impl CannedSource {
        pub(crate) fn new(data: serde_json::Value) -> Self {
            Self {
                rows: serde_json::from_value(data).expect("canned rows"),
                calls: Cell::new(0),
            }
        }
    }

    impl AuctionSource for CannedSource {
        fn country(&self) -> &'static str {
            "us"
        }

        fn name(&self) -> &'static str {
            "canned"
        }

        fn fetch(&self, query: &AuctionQuery) -> Result<AuctionTable, AppError> {
            self.calls.set(self.calls.get() + 1);
            Ok(normalize_rows(&self.rows, query.tenors.as_ref()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EXIT_USAGE;

    #[test]
    fn resolves_us_case_insensitively() {
        let registry = SourceRegistry::default();
        let source = registry.resolve(" US ").unwrap();
        assert_eq!(source.country(), "us");
    }

    #[test]
    fn unknown_country_lists_supported() {
        let err = match SourceRegistry::default().resolve("DE") {
            Ok(_) => panic!("expected an error"),
            Err(e) => e,
        };
        assert_eq!(err.exit_code(), EXIT_USAGE);
        assert_eq!(err.to_string(), "Country 'de' is not yet implemented. Supported: us");
    }
}
