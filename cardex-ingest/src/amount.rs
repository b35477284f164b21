//! Amount cleaning and sign normalization.
//!
//! Statement exports write the same value many ways: "- $59.27", "+ $66.00",
//! "$1,590.10", "-45.00". Cleaning strips the decoration; normalization maps
//! the source's sign convention onto the canonical one (spending positive).

use thiserror::Error;

/// Raised when an amount cell has no parseable number left after cleaning.
#[derive(Debug, Error, PartialEq)]
#[error("unparseable amount: {input:?}")]
pub struct FormatError {
    pub input: String,
}

/// Parse a raw amount cell into a signed value.
///
/// A literal `-` anywhere in the text marks the value negative; `+` carries
/// no numeric effect (a text with both is negative). Currency symbols,
/// commas, sign characters, and whitespace are stripped before parsing.
pub fn parse_amount(text: &str) -> Result<f64, FormatError> {
    let trimmed = text.trim();
    let is_negative = trimmed.contains('-');

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '+' | '-') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Err(FormatError { input: text.to_string() });
    }

    let value: f64 = cleaned.parse().map_err(|_| FormatError { input: text.to_string() })?;

    Ok(if is_negative { -value } else { value })
}

/// Map a parsed amount onto the canonical convention
/// (positive = spending, negative = credit/payment/refund).
pub fn normalize_amount(amount: f64, spending_is_negative: bool) -> f64 {
    if spending_is_negative { -amount } else { amount }
}
