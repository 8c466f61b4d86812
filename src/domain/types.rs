//! Normalized auction records and the table that carries them.
//!
//! The output schema is fixed: every table has the same columns in the same
//! order, whatever subset of fields the source actually returned.

use chrono::NaiveDate;

use crate::domain::tenor::TenorFilter;

/// One completed auction of a single security, after normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuctionRecord {
    pub auction_date: Option<NaiveDate>,
    pub issue_date: Option<NaiveDate>,
    pub announcement_date: Option<NaiveDate>,

    pub security_type: Option<String>,
    /// Term in the source's native unit (months for bills, years otherwise).
    pub term_raw: Option<f64>,
    /// Canonical tenor label derived from `security_type` + `term_raw`.
    pub tenor: Option<String>,
    pub cusip: Option<String>,
    pub security_desc: Option<String>,

    pub amount_offered: Option<f64>,
    pub amount_tendered: Option<f64>,
    pub amount_accepted: Option<f64>,

    pub bid_to_cover: Option<f64>,
    pub high_yield: Option<f64>,
    pub low_yield: Option<f64>,
    pub median_yield: Option<f64>,
    pub high_discount_rate: Option<f64>,
    pub high_investment_rate: Option<f64>,
    pub price_per_100: Option<f64>,

    pub auction_format: Option<String>,
}

impl AuctionRecord {
    /// Canonical output columns, in output order.
    pub const COLUMNS: [&'static str; 19] = [
        "auction_date",
        "issue_date",
        "announcement_date",
        "security_type",
        "term_raw",
        "tenor",
        "cusip",
        "security_desc",
        "amount_offered",
        "amount_tendered",
        "amount_accepted",
        "bid_to_cover",
        "high_yield",
        "low_yield",
        "median_yield",
        "high_discount_rate",
        "high_investment_rate",
        "price_per_100",
        "auction_format",
    ];

    /// Render a single cell by canonical column name. `None` is a null cell
    /// (or an unknown column).
    pub fn field(&self, column: &str) -> Option<String> {
        fn date(d: Option<NaiveDate>) -> Option<String> {
            d.map(|d| d.format("%Y-%m-%d").to_string())
        }
        fn num(v: Option<f64>) -> Option<String> {
            v.map(|v| v.to_string())
        }

        match column {
            "auction_date" => date(self.auction_date),
            "issue_date" => date(self.issue_date),
            "announcement_date" => date(self.announcement_date),
            "security_type" => self.security_type.clone(),
            "term_raw" => num(self.term_raw),
            "tenor" => self.tenor.clone(),
            "cusip" => self.cusip.clone(),
            "security_desc" => self.security_desc.clone(),
            "amount_offered" => num(self.amount_offered),
            "amount_tendered" => num(self.amount_tendered),
            "amount_accepted" => num(self.amount_accepted),
            "bid_to_cover" => num(self.bid_to_cover),
            "high_yield" => num(self.high_yield),
            "low_yield" => num(self.low_yield),
            "median_yield" => num(self.median_yield),
            "high_discount_rate" => num(self.high_discount_rate),
            "high_investment_rate" => num(self.high_investment_rate),
            "price_per_100" => num(self.price_per_100),
            "auction_format" => self.auction_format.clone(),
            _ => None,
        }
    }

    /// All cells in canonical column order.
    pub fn to_row(&self) -> Vec<Option<String>> {
        Self::COLUMNS.iter().map(|c| self.field(c)).collect()
    }
}

/// An ordered, immutable-after-build collection of normalized records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuctionTable {
    records: Vec<AuctionRecord>,
}

impl AuctionTable {
    pub fn new(records: Vec<AuctionRecord>) -> Self {
        Self { records }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &AuctionRecord::COLUMNS
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AuctionRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[AuctionRecord] {
        &self.records
    }

    /// Keep only rows whose tenor is in `filter`; rows without a tenor are dropped.
    /// Relative order is preserved.
    pub fn retain_tenors(mut self, filter: &TenorFilter) -> Self {
        self.records
            .retain(|r| r.tenor.as_deref().is_some_and(|t| filter.contains(t)));
        self
    }
}

impl<'a> IntoIterator for &'a AuctionTable {
    type Item = &'a AuctionRecord;
    type IntoIter = std::slice::Iter<'a, AuctionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cusip: &str, tenor: Option<&str>) -> AuctionRecord {
        AuctionRecord {
            cusip: Some(cusip.to_string()),
            tenor: tenor.map(str::to_string),
            ..AuctionRecord::default()
        }
    }

    #[test]
    fn to_row_follows_canonical_order() {
        let r = AuctionRecord {
            auction_date: NaiveDate::from_ymd_opt(2024, 1, 3),
            security_type: Some("Bill".to_string()),
            term_raw: Some(4.0),
            tenor: Some("4m".to_string()),
            high_yield: Some(5.28),
            ..AuctionRecord::default()
        };
        let row = r.to_row();
        assert_eq!(row.len(), AuctionRecord::COLUMNS.len());
        assert_eq!(row[0].as_deref(), Some("2024-01-03"));
        assert_eq!(row[1], None);
        assert_eq!(row[3].as_deref(), Some("Bill"));
        assert_eq!(row[4].as_deref(), Some("4"));
        assert_eq!(row[5].as_deref(), Some("4m"));
        assert_eq!(row[12].as_deref(), Some("5.28"));
        assert_eq!(row[18], None);
    }

    #[test]
    fn every_column_is_addressable() {
        let r = AuctionRecord {
            auction_format: Some("Single-Price".to_string()),
            ..AuctionRecord::default()
        };
        assert_eq!(r.field("auction_format").as_deref(), Some("Single-Price"));
        assert_eq!(r.field("not_a_column"), None);
    }

    #[test]
    fn retain_tenors_keeps_order_and_drops_nulls() {
        let table = AuctionTable::new(vec![
            record("A", Some("10y")),
            record("B", Some("4m")),
            record("C", None),
            record("D", Some("10Y")),
            record("E", Some("2y")),
        ]);
        let filter = TenorFilter::parse("10y,4m").unwrap();
        let kept = table.retain_tenors(&filter);
        let ids: Vec<_> = kept.iter().map(|r| r.cusip.clone().unwrap()).collect();
        assert_eq!(ids, vec!["A", "B", "D"]);
        assert_eq!(kept.columns(), &AuctionRecord::COLUMNS);
    }
}
