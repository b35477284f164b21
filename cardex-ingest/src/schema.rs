//! Inferred CSV layout descriptors.
//!
//! The external model returns a loosely-typed object; it is validated into
//! `SchemaDescriptor` at the boundary and rejected outright if any of the
//! eight fields is missing or mistyped. Once cached, a descriptor is
//! immutable and reused for every file sharing its identity key.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// The external call produced no usable structured result.
    #[error("schema inference failed: {0}")]
    Inference(String),
    /// The structured result did not validate as a descriptor.
    #[error("invalid schema descriptor: {0}")]
    Invalid(String),
}

/// How to decode one statement family's CSV layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    /// Whether a header row with column names follows the skipped rows.
    pub has_header: bool,
    /// Metadata/title rows before the header (or before data, if headerless).
    pub skip_rows: u32,
    /// Column name, or 0-based index as a string when `has_header` is false.
    pub date_column: String,
    pub description_column: String,
    pub amount_column: String,
    /// strptime-style pattern, e.g. "%m/%d/%Y" or "%Y-%m-%dT%H:%M:%S".
    pub date_format: String,
    /// Short provider identifier stamped onto every parsed transaction.
    pub card_provider: String,
    /// True when the source shows purchases as negative numbers.
    pub spending_is_negative: bool,
}

impl SchemaDescriptor {
    /// Validate a raw inference result into a descriptor.
    ///
    /// Fails fast on missing/mistyped fields, and on index-mode descriptors
    /// whose column fields are not 0-based integers.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SchemaError> {
        let descriptor: SchemaDescriptor =
            serde_json::from_value(value).map_err(|e| SchemaError::Invalid(e.to_string()))?;
        descriptor.column_layout()?;
        Ok(descriptor)
    }

    /// Resolve the name-vs-index column addressing into a tagged layout.
    pub fn column_layout(&self) -> Result<ColumnLayout, SchemaError> {
        if self.has_header {
            Ok(ColumnLayout::Named {
                date: self.date_column.clone(),
                description: self.description_column.clone(),
                amount: self.amount_column.clone(),
            })
        } else {
            let index = |field: &str, raw: &str| {
                raw.trim().parse::<usize>().map_err(|_| {
                    SchemaError::Invalid(format!("{field} {raw:?} is not a 0-based index"))
                })
            };
            Ok(ColumnLayout::Indexed {
                date: index("date_column", &self.date_column)?,
                description: index("description_column", &self.description_column)?,
                amount: index("amount_column", &self.amount_column)?,
            })
        }
    }
}

/// Column addressing for row decoding: by header name or by position.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnLayout {
    Named {
        date: String,
        description: String,
        amount: String,
    },
    Indexed {
        date: usize,
        description: usize,
        amount: usize,
    },
}
