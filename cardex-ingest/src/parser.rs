//! Schema-driven CSV parsing into canonical transactions.
//!
//! One row-decoding routine runs for both addressing modes; the layout
//! variant decides how cells are found. Rows that are not decodable data
//! (blank footers, section titles, malformed lines) are skipped in both
//! modes rather than failing the file.

use anyhow::{Context, Result};
use cardex_core::Transaction;
use chrono::NaiveDate;
use csv::StringRecord;
use std::fs;
use std::path::Path;

use crate::amount::{normalize_amount, parse_amount};
use crate::detect::{SchemaDetector, SchemaInference};
use crate::schema::{ColumnLayout, SchemaDescriptor};

/// Universal statement parser over an inferred-schema detector.
pub struct CsvParser<I> {
    detector: SchemaDetector<I>,
}

impl<I: SchemaInference> CsvParser<I> {
    pub fn new(detector: SchemaDetector<I>) -> Self {
        Self { detector }
    }

    /// Parse one file with its detected schema. Schema detection failures
    /// are fatal for the file; row-level noise is skipped.
    pub fn parse_file(&mut self, path: &Path) -> Result<Vec<Transaction>> {
        let schema = self
            .detector
            .detect(path)
            .with_context(|| format!("detecting schema for {}", path.display()))?;

        let content =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        decode_rows(&content, &schema)
    }

    /// Parse every `.csv` file directly in `dir` (case-insensitive extension,
    /// non-recursive) and return the combined stream sorted ascending by
    /// date. Same-date transactions keep per-file concatenation order; files
    /// are visited in name order so that order is deterministic.
    pub fn parse_all(&mut self, dir: &Path) -> Result<Vec<Transaction>> {
        let mut files = Vec::new();
        let entries =
            fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))?;
        for entry in entries {
            let path = entry
                .with_context(|| format!("read directory {}", dir.display()))?
                .path();
            let is_csv = path
                .extension()
                .map(|e| e.eq_ignore_ascii_case("csv"))
                .unwrap_or(false);
            if path.is_file() && is_csv {
                files.push(path);
            }
        }
        files.sort();

        let mut all = Vec::new();
        for file in &files {
            all.extend(self.parse_file(file)?);
        }
        all.sort_by_key(|t| t.date);
        Ok(all)
    }
}

fn decode_rows(content: &str, schema: &SchemaDescriptor) -> Result<Vec<Transaction>> {
    let layout = schema.column_layout()?;

    // Drop leading metadata/title rows before handing off to the csv reader.
    let skip = schema.skip_rows as usize;
    let remainder = content
        .lines()
        .skip(skip)
        .collect::<Vec<_>>()
        .join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(schema.has_header)
        .from_reader(remainder.as_bytes());

    // Named columns resolve to positions once, against the header row.
    let columns = match &layout {
        ColumnLayout::Named { date, description, amount } => {
            let headers = reader.headers().context("read header row")?.clone();
            let find = |name: &str| headers.iter().position(|h| h.trim() == name.trim());
            match (find(date), find(description), find(amount)) {
                (Some(d), Some(de), Some(a)) => (d, de, a),
                // Schema names a column the file does not have; nothing is
                // decodable, which downgrades the whole file to noise.
                _ => return Ok(Vec::new()),
            }
        }
        ColumnLayout::Indexed { date, description, amount } => (*date, *description, *amount),
    };

    let mut transactions = Vec::new();
    for record in reader.records() {
        let Ok(record) = record else { continue };
        if let Some(txn) = decode_row(&record, columns, schema) {
            transactions.push(txn);
        }
    }
    Ok(transactions)
}

/// Decode one record, or None for anything that is not a data row.
fn decode_row(
    record: &StringRecord,
    (date_idx, desc_idx, amount_idx): (usize, usize, usize),
    schema: &SchemaDescriptor,
) -> Option<Transaction> {
    let date_str = record.get(date_idx)?.trim();
    let description = record.get(desc_idx)?.trim();
    let amount_str = record.get(amount_idx)?.trim();

    // Empty essentials mark footers and blank separator lines.
    if date_str.is_empty() || amount_str.is_empty() {
        return None;
    }

    let date = parse_date(date_str, &schema.date_format)?;
    let raw = parse_amount(amount_str).ok()?;
    let amount = normalize_amount(raw, schema.spending_is_negative);

    Some(Transaction::new(date, description, amount, schema.card_provider.clone()))
}

/// Formats carrying a time component still yield the calendar date; chrono
/// ignores the extra fields when targeting `NaiveDate`.
fn parse_date(text: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, format).ok()
}
