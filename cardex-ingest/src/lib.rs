//! cardex-ingest: LLM-assisted statement ingestion.
//!
//! A file's column layout is inferred once per recurring statement family
//! (keyed by a date-stripped file name), cached, and then applied
//! deterministically to every file in that family.

pub mod amount;
pub mod detect;
pub mod identity;
pub mod parser;
pub mod schema;

pub use amount::{FormatError, normalize_amount, parse_amount};
pub use detect::{SchemaDetector, SchemaInference};
pub use identity::file_identity_key;
pub use parser::CsvParser;
pub use schema::{ColumnLayout, SchemaDescriptor, SchemaError};
