//! Row-by-row statement parsing under a detected dialect profile.
//!
//! One bad row never aborts the batch: field failures become diagnostics
//! and parsing moves on. Only a missing required column (or a batch where
//! every row failed) is fatal.

use analizador_core::Diagnostic;
use chrono::NaiveDate;
use csv::StringRecord;
use tracing::{info, warn};

use crate::dialect::{DialectProfile, Field};
use crate::error::{FieldError, ParseError};
use crate::normalize::{normalize_amount, normalize_concept, normalize_date};

/// Parser output before classification; the category is assigned by the
/// classifier afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub date: NaiveDate,
    pub concept: String,
    pub amount: f64,
}

/// Diagnostics embedded in a `NoValidRows` error are capped at this many.
const ERROR_SAMPLE: usize = 5;

/// Decode `payload` under the profile's encoding and parse every data row
/// independently, preserving source order.
pub fn parse_records(
    payload: &[u8],
    profile: &DialectProfile,
) -> Result<(Vec<ParsedRecord>, Vec<Diagnostic>), ParseError> {
    // Detection only probed a prefix; a payload whose tail breaks the
    // declared encoding never really was this dialect.
    let text = profile
        .encoding
        .decode(payload)
        .ok_or_else(|| ParseError::UnrecognizedFormat {
            tried: vec![profile.id.name()],
        })?;
    let body = skip_lines(&text, profile.skip_rows);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(profile.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());
    let mut records = reader.records();

    let header = match records.next() {
        Some(Ok(record)) => record,
        _ => {
            return Err(missing_columns(profile, &StringRecord::new()));
        }
    };
    let columns = resolve_columns(profile, &header)?;

    let mut rows = Vec::new();
    let mut diagnostics = Vec::new();
    let mut attempted = 0usize;

    for (i, result) in records.enumerate() {
        let row = i + 1;
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                attempted += 1;
                warn!(row, %err, "skipping unreadable row");
                diagnostics.push(Diagnostic::new(row, format!("unreadable row: {err}")));
                continue;
            }
        };
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        attempted += 1;
        match parse_row(&record, &columns, profile.date_pattern) {
            Ok(parsed) => rows.push(parsed),
            Err(err) => {
                warn!(row, %err, "skipping row");
                diagnostics.push(Diagnostic::new(row, err.to_string()));
            }
        }
    }

    if rows.is_empty() && attempted > 0 {
        let mut sample = diagnostics;
        sample.truncate(ERROR_SAMPLE);
        return Err(ParseError::NoValidRows {
            attempted,
            diagnostics: sample,
        });
    }

    info!(
        dialect = profile.id.name(),
        rows = rows.len(),
        skipped = diagnostics.len(),
        "statement parsed"
    );
    Ok((rows, diagnostics))
}

/// Header indexes of the three logical fields.
struct ColumnIndexes {
    date: usize,
    concept: usize,
    amount: usize,
}

fn resolve_columns(
    profile: &DialectProfile,
    header: &StringRecord,
) -> Result<ColumnIndexes, ParseError> {
    let mut date = None;
    let mut concept = None;
    let mut amount = None;

    for (name, field) in profile.columns {
        let found = header.iter().position(|cell| cell.trim() == *name);
        match field {
            Field::Date => date = found,
            Field::Concept => concept = found,
            Field::Amount => amount = found,
        }
    }

    match (date, concept, amount) {
        (Some(date), Some(concept), Some(amount)) => Ok(ColumnIndexes {
            date,
            concept,
            amount,
        }),
        _ => Err(missing_columns(profile, header)),
    }
}

fn missing_columns(profile: &DialectProfile, header: &StringRecord) -> ParseError {
    let missing = profile
        .columns
        .iter()
        .filter(|(name, _)| !header.iter().any(|cell| cell.trim() == *name))
        .map(|(name, _)| (*name).to_string())
        .collect();
    ParseError::MissingColumns {
        missing,
        available: header.iter().map(|cell| cell.trim().to_string()).collect(),
    }
}

fn parse_row(
    record: &StringRecord,
    columns: &ColumnIndexes,
    date_pattern: &str,
) -> Result<ParsedRecord, FieldError> {
    let date = normalize_date(record.get(columns.date).unwrap_or(""), date_pattern)?;
    let concept = normalize_concept(record.get(columns.concept).unwrap_or(""));
    let amount = normalize_amount(record.get(columns.amount).unwrap_or(""))?;
    Ok(ParsedRecord {
        date,
        concept,
        amount,
    })
}

/// Drop the dialect's preamble before handing the rest to the CSV reader;
/// preamble rows are free-form and not necessarily valid CSV.
fn skip_lines(text: &str, n: usize) -> &str {
    let mut rest = text;
    for _ in 0..n {
        match rest.find('\n') {
            Some(i) => rest = &rest[i + 1..],
            None => return "",
        }
    }
    rest
}
