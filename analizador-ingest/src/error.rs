use analizador_core::Diagnostic;
use thiserror::Error;

/// Fatal, payload-level failures. A [`ParseError`] is the sole content of
/// the outcome: no partial results accompany it.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unrecognized statement format; dialects tried: {}", .tried.join(", "))]
    UnrecognizedFormat { tried: Vec<&'static str> },

    #[error(
        "required columns missing: {}; available: {}",
        .missing.join(", "),
        .available.join(", ")
    )]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error(
        "none of the {attempted} data rows could be parsed; first errors: {}",
        join_rows(.diagnostics)
    )]
    NoValidRows {
        attempted: usize,
        /// Capped to the first few row diagnostics
        diagnostics: Vec<Diagnostic>,
    },
}

fn join_rows(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("row {}: {}", d.row, d.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Per-row field failures. These never escape the record parser: each one
/// is downgraded to a [`Diagnostic`] and the row is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("empty {0} field")]
    Empty(&'static str),

    #[error("cannot interpret '{0}' as an amount")]
    InvalidAmount(String),

    #[error("cannot parse date '{token}' with pattern '{pattern}'")]
    InvalidDate { token: String, pattern: String },
}
