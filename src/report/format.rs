//! Terminal formatting for the auction preview and run summary.

use std::path::Path;

use crate::domain::AuctionTable;

/// Columns shown in the console preview.
pub const PREVIEW_COLUMNS: &[&str] = &[
    "auction_date",
    "tenor",
    "security_type",
    "amount_offered",
    "amount_accepted",
    "bid_to_cover",
    "high_yield",
];

/// Rows shown in the console preview.
pub const PREVIEW_ROWS: usize = 20;

/// Cells wider than this are clipped with a trailing `~`.
pub const MAX_CELL_WIDTH: usize = 24;

const NULL_CELL: &str = "NaN";

/// Render the first `max_rows` rows as a right-aligned text table.
pub fn format_preview(table: &AuctionTable, max_rows: usize) -> String {
    let rows: Vec<Vec<String>> = table
        .iter()
        .take(max_rows)
        .map(|record| {
            PREVIEW_COLUMNS
                .iter()
                .map(|c| clip(record.field(c).as_deref().unwrap_or(NULL_CELL)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = PREVIEW_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, PREVIEW_COLUMNS.iter().copied(), &widths);
    for row in &rows {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

/// `Saved 1,234 rows -> path`.
pub fn format_saved_summary(n_rows: usize, path: &Path) -> String {
    format!("Saved {} rows -> {}", group_thousands(n_rows), path.display())
}

pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, w)| format!("{cell:>w$}", w = *w))
        .collect();
    out.push_str(&line.join(" "));
    out.push('\n');
}

fn clip(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        cell.to_string()
    } else {
        let mut s: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
        s.push('~');
        s
    }
}
