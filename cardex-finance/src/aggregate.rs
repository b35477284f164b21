//! Spending roll-ups over categorized transactions.
//!
//! `Payment/Credit` rows are money moved to the card issuer, not spending;
//! every total here can exclude them so category and card breakdowns reflect
//! net spending.

use cardex_core::{Category, Transaction};
use std::collections::HashMap;

/// Transactions that count as spending (everything but `Payment/Credit`).
pub fn spending_only(transactions: &[Transaction]) -> Vec<&Transaction> {
    transactions.iter().filter(|t| !t.is_payment()).collect()
}

/// Total amount per category label, largest first. Uncategorized
/// transactions land in an "Uncategorized" bucket.
pub fn totals_by_category(
    transactions: &[Transaction],
    exclude_payments: bool,
) -> Vec<(String, f64)> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for txn in transactions {
        if exclude_payments && txn.is_payment() {
            continue;
        }
        *totals.entry(txn.display_category()).or_insert(0.0) += txn.amount;
    }
    let mut out: Vec<(String, f64)> =
        totals.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
    out.sort_by(|a, b| b.1.total_cmp(&a.1));
    out
}

/// Total amount per card provider, sorted by provider name.
pub fn totals_by_card(
    transactions: &[Transaction],
    exclude_payments: bool,
) -> Vec<(String, f64)> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for txn in transactions {
        if exclude_payments && txn.is_payment() {
            continue;
        }
        *totals.entry(txn.card_provider.as_str()).or_insert(0.0) += txn.amount;
    }
    let mut out: Vec<(String, f64)> =
        totals.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

/// Sum of all payment/credit rows.
pub fn payments_total(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.category == Some(Category::PaymentCredit))
        .map(|t| t.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(description: &str, amount: f64, provider: &str, category: Category) -> Transaction {
        let mut t = Transaction::new(
            NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
            description,
            amount,
            provider,
        );
        t.category = Some(category);
        t
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("TRADER JOE'S #553", 84.21, "AMEX", Category::Grocery),
            txn("WEGMANS #45", 15.79, "CHASE", Category::Grocery),
            txn("NETFLIX.COM", 15.49, "AMEX", Category::Subscriptions),
            txn("AUTOPAY PAYMENT - THANK YOU", -450.00, "AMEX", Category::PaymentCredit),
        ]
    }

    #[test]
    fn test_spending_excludes_issuer_payments() {
        let txns = sample();
        let spending = spending_only(&txns);
        assert_eq!(spending.len(), 3);
        assert!(spending.iter().all(|t| t.category != Some(Category::PaymentCredit)));
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_category_totals_sorted_descending() {
        let totals = totals_by_category(&sample(), true);
        assert_eq!(totals[0].0, "Grocery");
        assert!(close(totals[0].1, 100.00));
        assert_eq!(totals[1].0, "Subscriptions");
        assert!(close(totals[1].1, 15.49));
        assert!(!totals.iter().any(|(label, _)| label == "Payment/Credit"));
    }

    #[test]
    fn test_category_totals_can_include_payments() {
        let totals = totals_by_category(&sample(), false);
        assert!(totals.iter().any(|(label, total)| label == "Payment/Credit" && close(*total, -450.00)));
    }

    #[test]
    fn test_card_totals_sorted_by_name() {
        let totals = totals_by_card(&sample(), true);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].0, "AMEX");
        assert!(close(totals[0].1, 99.70));
        assert_eq!(totals[1].0, "CHASE");
        assert!(close(totals[1].1, 15.79));
    }

    #[test]
    fn test_uncategorized_bucket() {
        let mut txns = sample();
        txns[0].category = None;
        let totals = totals_by_category(&txns, true);
        assert!(totals.iter().any(|(label, _)| label == "Uncategorized"));
    }

    #[test]
    fn test_payments_total() {
        assert_eq!(payments_total(&sample()), -450.00);
    }
}
