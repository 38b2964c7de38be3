use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A normalized, categorized statement row (bank-agnostic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Cleaned display text; never empty
    pub concept: String,
    /// Negative = outflow, positive = inflow. The sign comes from the
    /// source export and is never inverted here.
    pub amount: f64,
    /// Category label assigned by keyword matching; never empty
    pub category: String,
}

/// Why a data row was skipped. Non-fatal; returned alongside the rows
/// that did parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based index of the row within the payload's data rows
    pub row: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}
