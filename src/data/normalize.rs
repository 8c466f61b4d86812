//! Raw row -> `AuctionRecord` normalization.
//!
//! Nothing here touches the network. Given the decoded `data` array, this:
//! - coerces numeric fields (invalid -> null)
//! - coerces date fields (invalid -> null)
//! - derives `tenor`
//! - applies the optional tenor filter
//! - maps raw field names onto the canonical schema
//!
//! Output order always equals input order.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{AuctionRecord, AuctionTable, TenorFilter, normalize_tenor};

/// Fields requested from the auctions dataset.
pub const REQUESTED_FIELDS: &[&str] = &[
    "auction_date",
    "issue_date",
    "security_type",
    "security_term",
    "cusip",
    "offering_amount",
    "tendered_total",
    "accepted_total",
    "bid_to_cover_ratio",
    "high_yield",
    "low_yield",
    "median_yield",
    "high_discount_rate",
    "high_investment_rate",
    "price_per_100",
    "auction_format",
    "security_desc",
    "announcement_date",
];

/// One element of the response `data` array.
///
/// Every field is optional: keys the provider omits default to `None`.
/// Values are kept as raw JSON so strings like `"null"` or `"12.5"` can be
/// coerced field by field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAuctionRow {
    pub auction_date: Option<Value>,
    pub issue_date: Option<Value>,
    pub announcement_date: Option<Value>,
    pub security_type: Option<Value>,
    pub security_term: Option<Value>,
    pub cusip: Option<Value>,
    pub security_desc: Option<Value>,
    pub offering_amount: Option<Value>,
    pub tendered_total: Option<Value>,
    pub accepted_total: Option<Value>,
    pub bid_to_cover_ratio: Option<Value>,
    pub high_yield: Option<Value>,
    pub low_yield: Option<Value>,
    pub median_yield: Option<Value>,
    pub high_discount_rate: Option<Value>,
    pub high_investment_rate: Option<Value>,
    pub price_per_100: Option<Value>,
    pub auction_format: Option<Value>,
}

impl RawAuctionRow {
    pub fn normalize(&self) -> AuctionRecord {
        let security_type = coerce_text(self.security_type.as_ref());
        let tenor = normalize_tenor(security_type.as_deref(), self.security_term.as_ref());

        AuctionRecord {
            auction_date: coerce_date(self.auction_date.as_ref()),
            issue_date: coerce_date(self.issue_date.as_ref()),
            announcement_date: coerce_date(self.announcement_date.as_ref()),
            term_raw: coerce_number(self.security_term.as_ref()),
            tenor,
            security_type,
            cusip: coerce_text(self.cusip.as_ref()),
            security_desc: coerce_text(self.security_desc.as_ref()),
            amount_offered: coerce_number(self.offering_amount.as_ref()),
            amount_tendered: coerce_number(self.tendered_total.as_ref()),
            amount_accepted: coerce_number(self.accepted_total.as_ref()),
            bid_to_cover: coerce_number(self.bid_to_cover_ratio.as_ref()),
            high_yield: coerce_number(self.high_yield.as_ref()),
            low_yield: coerce_number(self.low_yield.as_ref()),
            median_yield: coerce_number(self.median_yield.as_ref()),
            high_discount_rate: coerce_number(self.high_discount_rate.as_ref()),
            high_investment_rate: coerce_number(self.high_investment_rate.as_ref()),
            price_per_100: coerce_number(self.price_per_100.as_ref()),
            auction_format: coerce_text(self.auction_format.as_ref()),
        }
    }
}

/// Normalize a decoded `data` array into a canonical table.
pub fn normalize_rows(rows: &[RawAuctionRow], filter: Option<&TenorFilter>) -> AuctionTable {
    if rows.is_empty() {
        return AuctionTable::default();
    }
    let table = AuctionTable::new(rows.iter().map(RawAuctionRow::normalize).collect());
    match filter {
        Some(filter) => table.retain_tenors(filter),
        None => table,
    }
}

/// Fiscal Data encodes missing values as the literal string `"null"`.
fn is_null_text(s: &str) -> bool {
    s.is_empty() || s.eq_ignore_ascii_case("null")
}

pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let v = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if is_null_text(trimmed) {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    if v.is_finite() { Some(v) } else { None }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part (`T...` or ` ...`).
pub fn coerce_date(value: Option<&Value>) -> Option<NaiveDate> {
    let Value::String(s) = value? else {
        return None;
    };
    let trimmed = s.trim();
    let date_part = trimmed
        .split_once(['T', ' '])
        .map(|(d, _)| d)
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub fn coerce_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            if is_null_text(trimmed) { None } else { Some(trimmed.to_string()) }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: Value) -> Vec<RawAuctionRow> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn bill_and_note_scenario() {
        let raw = rows(json!([
            {"security_type": "Bill", "security_term": "4", "auction_date": "2024-01-04",
             "cusip": "912797JR9", "offering_amount": "80000000000", "high_yield": "null"},
            {"security_type": "Note", "security_term": "10", "auction_date": "2024-01-03",
             "cusip": "91282CJJ1", "bid_to_cover_ratio": "2.45", "high_yield": "4.024"}
        ]));
        let table = normalize_rows(&raw, None);
        assert_eq!(table.len(), 2);

        let first = &table.records()[0];
        assert_eq!(first.tenor.as_deref(), Some("4m"));
        assert_eq!(first.term_raw, Some(4.0));
        assert_eq!(first.amount_offered, Some(80_000_000_000.0));
        assert_eq!(first.high_yield, None);
        assert_eq!(first.auction_date, NaiveDate::from_ymd_opt(2024, 1, 4));

        let second = &table.records()[1];
        assert_eq!(second.tenor.as_deref(), Some("10y"));
        assert_eq!(second.bid_to_cover, Some(2.45));
        assert_eq!(second.cusip.as_deref(), Some("91282CJJ1"));
    }

    #[test]
    fn missing_fields_become_null() {
        let raw = rows(json!([{"security_type": "Bond"}]));
        let table = normalize_rows(&raw, None);
        let r = &table.records()[0];
        assert_eq!(r.tenor, None);
        assert_eq!(r.auction_date, None);
        assert_eq!(r.price_per_100, None);
        assert_eq!(r.to_row().len(), AuctionRecord::COLUMNS.len());
    }

    #[test]
    fn bad_values_are_nulled_not_fatal() {
        let raw = rows(json!([{
            "security_type": "Note",
            "security_term": "abc",
            "auction_date": "2024-13-45",
            "issue_date": "2024-02-15T00:00:00",
            "offering_amount": "lots",
            "high_yield": 4.5
        }]));
        let r = normalize_rows(&raw, None).records()[0].clone();
        assert_eq!(r.tenor, None);
        assert_eq!(r.term_raw, None);
        assert_eq!(r.auction_date, None);
        assert_eq!(r.issue_date, NaiveDate::from_ymd_opt(2024, 2, 15));
        assert_eq!(r.amount_offered, None);
        assert_eq!(r.high_yield, Some(4.5));
    }

    #[test]
    fn filter_drops_unmatched_and_null_tenors() {
        let raw = rows(json!([
            {"security_type": "Bill", "security_term": "6"},
            {"security_type": "Note", "security_term": ""},
            {"security_type": "Note", "security_term": "5"},
            {"security_type": "Bill", "security_term": "26"}
        ]));
        let filter = TenorFilter::parse("6M,5y").unwrap();
        let table = normalize_rows(&raw, Some(&filter));
        let tenors: Vec<_> = table.iter().map(|r| r.tenor.clone().unwrap()).collect();
        assert_eq!(tenors, vec!["6m", "5y"]);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = normalize_rows(&[], TenorFilter::parse("10y").as_ref());
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 19);
    }

    #[test]
    fn normalization_is_repeatable() {
        let raw = rows(json!([
            {"security_type": "Bill", "security_term": "1.0009", "auction_date": "2024-01-02"},
            {"security_type": "Note", "security_term": 4.7}
        ]));
        assert_eq!(normalize_rows(&raw, None), normalize_rows(&raw, None));
    }

    #[test]
    fn text_coercion() {
        assert_eq!(coerce_text(Some(&json!("  Single-Price "))).as_deref(), Some("Single-Price"));
        assert_eq!(coerce_text(Some(&json!("null"))), None);
        assert_eq!(coerce_text(Some(&Value::Null)), None);
        assert_eq!(coerce_text(Some(&json!(12))).as_deref(), Some("12"));
    }
}
