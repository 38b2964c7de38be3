//! Statement dialect profiles and automatic format detection.
//!
//! A dialect describes one supported file shape: delimiter, text encoding,
//! preamble length, date pattern, and the source column names that map to
//! the logical date/concept/amount fields. Detection picks a profile once
//! per payload; the record parser then applies it to every row.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ParseError;

/// Identifies one supported input shape; stable names show up in logs
/// and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialectId {
    /// Semicolon-delimited Latin-1 bank export with a 7-row preamble
    #[serde(rename = "banco")]
    Bank,
    /// Comma-delimited UTF-8 export with no preamble
    #[serde(rename = "simple")]
    Simple,
}

impl DialectId {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bank => "banco",
            Self::Simple => "simple",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Latin1,
    Utf8,
}

impl Encoding {
    /// Decode a full payload, or `None` when the bytes are not valid under
    /// this encoding.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            // Latin-1 maps every byte 1:1 onto U+0000..=U+00FF, so this
            // cannot fail.
            Encoding::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
            Encoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
        }
    }
}

/// Logical fields every dialect must map from its source columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Concept,
    Amount,
}

/// Immutable description of one supported file shape.
#[derive(Debug, Clone)]
pub struct DialectProfile {
    pub id: DialectId,
    pub delimiter: u8,
    pub encoding: Encoding,
    /// Leading rows to drop before the header row
    pub skip_rows: usize,
    /// Strict date pattern for this dialect (chrono `parse_from_str` syntax)
    pub date_pattern: &'static str,
    /// Source column name → logical field
    pub columns: &'static [(&'static str, Field)],
}

/// Supported dialects in detection priority order: the bank export is
/// probed first because its semicolon rows would also split (into a single
/// cell) under the simple profile.
pub const DIALECTS: &[DialectProfile] = &[
    DialectProfile {
        id: DialectId::Bank,
        delimiter: b';',
        encoding: Encoding::Latin1,
        skip_rows: 7,
        date_pattern: "%d/%m/%Y",
        columns: &[
            ("Fecha operaci\u{f3}n", Field::Date),
            ("Concepto", Field::Concept),
            ("Importe", Field::Amount),
        ],
    },
    DialectProfile {
        id: DialectId::Simple,
        delimiter: b',',
        encoding: Encoding::Utf8,
        skip_rows: 0,
        date_pattern: "%Y-%m-%d",
        columns: &[
            ("fecha", Field::Date),
            ("concepto", Field::Concept),
            ("monto", Field::Amount),
        ],
    },
];

/// Detection only ever looks at this much of the payload; the full decode
/// happens once, in the record parser.
const PROBE_LIMIT: usize = 4096;

/// Pick the first profile whose encoding decodes the payload prefix and
/// whose header row (after the declared preamble) contains at least one of
/// its source column names.
pub fn detect_dialect<'a>(
    payload: &[u8],
    dialects: &'a [DialectProfile],
) -> Result<&'a DialectProfile, ParseError> {
    for profile in dialects {
        if probe(payload, profile) {
            info!(dialect = profile.id.name(), "detected statement dialect");
            return Ok(profile);
        }
        debug!(dialect = profile.id.name(), "dialect probe rejected");
    }
    Err(ParseError::UnrecognizedFormat {
        tried: dialects.iter().map(|p| p.id.name()).collect(),
    })
}

fn probe(payload: &[u8], profile: &DialectProfile) -> bool {
    let Some(text) = profile.encoding.decode(probe_window(payload)) else {
        return false;
    };
    let Some(header) = text.lines().nth(profile.skip_rows) else {
        return false;
    };
    let cells: Vec<&str> = header.split(profile.delimiter as char).map(str::trim).collect();
    profile
        .columns
        .iter()
        .any(|(name, _)| cells.iter().any(|cell| cell == name))
}

/// Bounded prefix cut on a line boundary, so the cut never splits a
/// multi-byte character.
fn probe_window(payload: &[u8]) -> &[u8] {
    if payload.len() <= PROBE_LIMIT {
        return payload;
    }
    let window = &payload[..PROBE_LIMIT];
    match window.iter().rposition(|&b| b == b'\n') {
        Some(i) => &window[..=i],
        None => window,
    }
}
