//! analizador-ingest: statement dialect detection, locale-aware field
//! normalization, and row-by-row parsing into categorized transactions.

pub mod dialect;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod pipeline;

pub use dialect::{DIALECTS, DialectId, DialectProfile, detect_dialect};
pub use error::{FieldError, ParseError};
pub use pipeline::{ParseReport, Pipeline};
