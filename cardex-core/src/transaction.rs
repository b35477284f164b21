//! Unified transaction model produced by parsing and consumed by
//! categorization and aggregation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::category::Category;

/// A single statement line, normalized to one sign convention:
/// positive = spending, negative = credit/payment/refund. The convention is
/// fixed when the row is parsed; nothing downstream re-interprets sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Raw merchant/memo text as exported, case untouched.
    pub description: String,
    pub amount: f64,
    /// Short provider identifier (AMEX, VENMO, ...), taken from the inferred
    /// schema rather than per-row data.
    pub card_provider: String,
    /// None until categorization runs.
    pub category: Option<Category>,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        card_provider: impl Into<String>,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            card_provider: card_provider.into(),
            category: None,
        }
    }

    /// Category label for display; uncategorized transactions render as
    /// "Uncategorized" but the cache never stores that placeholder.
    pub fn display_category(&self) -> &'static str {
        self.category.map(Category::as_label).unwrap_or("Uncategorized")
    }

    /// True for charges under the canonical convention.
    pub fn is_spending(&self) -> bool {
        self.amount > 0.0
    }

    /// True for payments made to the card issuer.
    pub fn is_payment(&self) -> bool {
        self.category == Some(Category::PaymentCredit)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desc: String = self.description.chars().take(40).collect();
        write!(
            f,
            "{} | {:5} | ${:8.2} | {:40} | {}",
            self.date.format("%Y-%m-%d"),
            self.card_provider,
            self.amount,
            desc,
            self.display_category()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(amount: f64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
            "TRADER JOE'S #553 AUSTIN TX",
            amount,
            "AMEX",
        )
    }

    #[test]
    fn test_display_category_defaults_to_uncategorized() {
        let mut t = txn(42.17);
        assert_eq!(t.display_category(), "Uncategorized");
        t.category = Some(Category::Grocery);
        assert_eq!(t.display_category(), "Grocery");
    }

    #[test]
    fn test_spending_sign_convention() {
        assert!(txn(19.99).is_spending());
        assert!(!txn(-250.0).is_spending());
    }

    #[test]
    fn test_display_row_format() {
        let mut t = txn(42.17);
        t.category = Some(Category::Grocery);
        let row = t.to_string();
        assert!(row.starts_with("2025-11-03 | AMEX "));
        assert!(row.contains("$   42.17"));
        assert!(row.ends_with("| Grocery"));
    }
}
