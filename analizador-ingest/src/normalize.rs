//! Locale-aware field normalizers for amounts, dates, and free-text
//! concepts.
//!
//! These operate on string shape alone: none of them knows which dialect
//! produced the token, so the same heuristics apply to every input file.

use chrono::NaiveDate;
use regex::Regex;

use crate::error::FieldError;

/// Placeholder concept for rows whose description cell is blank.
pub const EMPTY_CONCEPT: &str = "Sin concepto";

/// Currency glyphs stripped before numeric interpretation. U+0080 is the
/// raw Windows-1252 euro byte as it surfaces through a Latin-1 decode.
const CURRENCY_GLYPHS: &[char] = &['\u{20ac}', '$', '\u{80}'];

/// Convert a monetary token in an unknown locale dialect into a signed
/// value.
///
/// Both `.` and `,` present means European grouping: dots are thousands
/// separators and the comma is the decimal point ("1.234,56" → 1234.56).
/// A lone comma is a decimal comma ("24,95" → 24.95); anything else parses
/// as a plain decimal.
pub fn normalize_amount(raw: &str) -> Result<f64, FieldError> {
    let token = raw.trim();
    if token.is_empty() {
        return Err(FieldError::Empty("amount"));
    }

    let mut cleaned: String = token
        .chars()
        .filter(|c| !CURRENCY_GLYPHS.contains(c) && !c.is_whitespace())
        .collect();

    if cleaned.contains(',') && cleaned.contains('.') {
        cleaned = cleaned.replace('.', "").replace(',', ".");
    } else if cleaned.contains(',') {
        cleaned = cleaned.replace(',', ".");
    }

    cleaned
        .parse::<f64>()
        .map_err(|_| FieldError::InvalidAmount(token.to_string()))
}

/// Parse a date token strictly under `pattern`, falling back to a generic
/// digit-shape parse when the token misses the dialect's declared format.
pub fn normalize_date(raw: &str, pattern: &str) -> Result<NaiveDate, FieldError> {
    let token = raw.trim();
    if token.is_empty() {
        return Err(FieldError::Empty("date"));
    }
    if let Ok(date) = NaiveDate::parse_from_str(token, pattern) {
        return Ok(date);
    }
    parse_generic_date(token).ok_or_else(|| FieldError::InvalidDate {
        token: token.to_string(),
        pattern: pattern.to_string(),
    })
}

/// Three digit groups split on `/`, `-` or `.`, with the 4-digit year
/// either leading (Y-M-D) or trailing (D-M-Y). Two-digit years are
/// ambiguous and rejected.
fn parse_generic_date(token: &str) -> Option<NaiveDate> {
    let re = Regex::new(r"^(\d{1,4})[/.\-](\d{1,2})[/.\-](\d{1,4})$").ok()?;
    let caps = re.captures(token)?;
    let first: u32 = caps[1].parse().ok()?;
    let mid: u32 = caps[2].parse().ok()?;
    let last: u32 = caps[3].parse().ok()?;
    if caps[1].len() == 4 {
        NaiveDate::from_ymd_opt(first as i32, mid, last)
    } else if caps[3].len() == 4 {
        NaiveDate::from_ymd_opt(last as i32, mid, first)
    } else {
        None
    }
}

/// Trim and collapse interior whitespace; a blank cell becomes the fixed
/// placeholder. Never fails, and is idempotent.
pub fn normalize_concept(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return EMPTY_CONCEPT.to_string();
    }
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}
