//! Crawl date parsing.
//!
//! Crawl dates arrive as user input (`--date 2024-01-08`). An absent input is
//! a valid intent ("use the latest crawl"); anything present must be exactly
//! `YYYY-MM-DD` and a real calendar date. Bad input never becomes an error,
//! it degrades to absent with a diagnostic the caller can print.

use chrono::NaiveDate;

/// Exactly four digits, hyphen, two digits, hyphen, two digits.
fn has_date_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter()
            .enumerate()
            .all(|(i, c)| match i {
                4 | 7 => *c == b'-',
                _ => c.is_ascii_digit(),
            })
}

/// Parse an optional crawl date string. Returns `None` both for absent input
/// and for input that is malformed or not a real calendar date; the latter
/// two push a diagnostic so the failure is visible without being fatal.
pub fn parse_crawl_date(input: Option<&str>, diagnostics: &mut Vec<String>) -> Option<NaiveDate> {
    let s = input?;

    if !has_date_shape(s) {
        diagnostics.push(format!("invalid crawl date: {s:?} (expected YYYY-MM-DD)"));
        return None;
    }

    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            diagnostics.push(format!("not a calendar date: {s:?} ({e})"));
            None
        }
    }
}
