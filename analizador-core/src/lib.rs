//! analizador-core: normalized transaction types and the keyword classifier.

pub mod rules;
pub mod transaction;

pub use rules::{CategoryRule, CategoryRuleSet};
pub use transaction::{Diagnostic, Transaction};
