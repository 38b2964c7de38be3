//! The ingestion entry point: raw payload in, categorized transactions out.

use analizador_core::{CategoryRuleSet, Diagnostic, Transaction};
use serde::Serialize;

use crate::dialect::{DIALECTS, DialectId, DialectProfile, detect_dialect};
use crate::error::ParseError;
use crate::parser::parse_records;

/// Successful outcome of [`Pipeline::process`]: the detected dialect, every
/// transaction in source order, and the reasons any rows were skipped.
#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    pub dialect: DialectId,
    pub transactions: Vec<Transaction>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Detection → parsing → classification over immutable configuration.
///
/// Holds no mutable state, so one instance can serve concurrent payloads
/// from multiple threads.
pub struct Pipeline {
    dialects: &'static [DialectProfile],
    rules: CategoryRuleSet,
}

impl Pipeline {
    pub fn new(dialects: &'static [DialectProfile], rules: CategoryRuleSet) -> Self {
        Self { dialects, rules }
    }

    /// Process one statement payload. Fatal errors (unknown format, missing
    /// columns, zero parseable rows) propagate immediately; per-row
    /// failures come back as diagnostics next to the parsed transactions.
    pub fn process(&self, payload: &[u8]) -> Result<ParseReport, ParseError> {
        let profile = detect_dialect(payload, self.dialects)?;
        let (records, diagnostics) = parse_records(payload, profile)?;

        let transactions = records
            .into_iter()
            .map(|record| {
                let category = self.rules.classify(&record.concept).to_string();
                Transaction {
                    date: record.date,
                    concept: record.concept,
                    amount: record.amount,
                    category,
                }
            })
            .collect();

        Ok(ParseReport {
            dialect: profile.id,
            transactions,
            diagnostics,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(DIALECTS, CategoryRuleSet::default())
    }
}
