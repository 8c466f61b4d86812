//! Tenor normalization.
//!
//! Auction sources report `security_term` in a unit that depends on the
//! instrument: bills are quoted in **months**, notes/bonds/FRNs/TIPS in **years**.
//! This module turns `(security_type, security_term)` into a canonical label such
//! as `6m` or `10y`.
//!
//! Rules (deterministic, pure):
//! - the term is parsed as `f64`; missing, blank, unparseable or non-finite terms
//!   yield no tenor
//! - the unit is chosen once via [`TermUnit::classify`]
//! - the value is matched against the unit's reference points with a 0.1% relative
//!   tolerance, first match wins
//! - otherwise the value is truncated toward zero and suffixed (`15m`, `4y`)

use std::collections::BTreeSet;

use serde_json::Value;

/// Relative tolerance used when matching a term against a reference point.
pub const REL_TOLERANCE: f64 = 1e-3;

/// Month reference points for bill-like instruments, in check order.
pub const MONTH_POINTS: &[(f64, &str)] = &[
    (1.0, "1m"),
    (2.0, "2m"),
    (3.0, "3m"),
    (4.0, "4m"),
    (6.0, "6m"),
    (12.0, "1y"),
];

/// Year reference points for everything else, in check order.
pub const YEAR_POINTS: &[(f64, &str)] = &[
    (1.0, "1y"),
    (2.0, "2y"),
    (3.0, "3y"),
    (5.0, "5y"),
    (7.0, "7y"),
    (10.0, "10y"),
    (20.0, "20y"),
    (30.0, "30y"),
];

/// Unit in which a raw `security_term` is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermUnit {
    /// Bill-like instruments.
    Months,
    /// Notes, bonds, FRNs, TIPS and anything unrecognized.
    Years,
}

impl TermUnit {
    /// Classify a free-text security type. Any type containing "bill"
    /// (case-insensitive) is month-based.
    pub fn classify(security_type: Option<&str>) -> Self {
        match security_type {
            Some(s) if s.to_lowercase().contains("bill") => TermUnit::Months,
            _ => TermUnit::Years,
        }
    }

    pub fn reference_points(self) -> &'static [(f64, &'static str)] {
        match self {
            TermUnit::Months => MONTH_POINTS,
            TermUnit::Years => YEAR_POINTS,
        }
    }

    pub fn suffix(self) -> char {
        match self {
            TermUnit::Months => 'm',
            TermUnit::Years => 'y',
        }
    }

    /// Bucket a parsed term into a label.
    pub fn label(self, term: f64) -> String {
        for &(point, label) in self.reference_points() {
            if is_close(term, point) {
                return label.to_string();
            }
        }
        // Truncation toward zero, not rounding: 4.7y -> "4y".
        // Formatted from the float so huge terms keep every digit; `+ 0.0` folds -0 into 0.
        format!("{:.0}{}", term.trunc() + 0.0, self.suffix())
    }
}

/// `|a - b| <= REL_TOLERANCE * max(|a|, |b|)`.
pub fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= REL_TOLERANCE * a.abs().max(b.abs())
}

/// Parse a raw term value (JSON number or numeric string).
pub fn parse_term(term: Option<&Value>) -> Option<f64> {
    let v = match term? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    if v.is_finite() { Some(v) } else { None }
}

/// Compute the canonical tenor label for one row.
pub fn normalize_tenor(security_type: Option<&str>, security_term: Option<&Value>) -> Option<String> {
    let term = parse_term(security_term)?;
    Some(TermUnit::classify(security_type).label(term))
}

/// A set of requested tenor labels (lower-cased).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TenorFilter {
    wanted: BTreeSet<String>,
}

impl TenorFilter {
    /// Parse a comma-separated list such as `"6m, 1Y,,10y"`.
    ///
    /// Returns `None` when no non-blank token remains, which means "all tenors".
    pub fn parse(raw: &str) -> Option<Self> {
        Self::from_labels(raw.split(','))
    }

    pub fn from_labels<I, S>(labels: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: BTreeSet<String> = labels
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        if wanted.is_empty() { None } else { Some(Self { wanted }) }
    }

    pub fn contains(&self, tenor: &str) -> bool {
        self.wanted.contains(&tenor.to_lowercase())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.wanted.iter().map(String::as_str)
    }
}
