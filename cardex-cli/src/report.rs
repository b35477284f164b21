//! Plain-text report rendering over the categorized stream.

use cardex_core::Transaction;
use cardex_finance::aggregate::{payments_total, spending_only, totals_by_card, totals_by_category};

const RULE: &str = "========================================================================";
const DASH: &str = "------------------------------------------------------------------------";

pub fn print_summary(transactions: &[Transaction]) {
    let spending = spending_only(transactions);
    let payment_count = transactions.len() - spending.len();

    let total_spending: f64 = spending.iter().map(|t| t.amount).sum();
    let total_payments = payments_total(transactions);

    println!("\n{RULE}");
    println!("TRANSACTION SUMMARY");
    println!("{RULE}");
    println!("\nSpending Transactions: {}", spending.len());
    println!("Total Spending: ${:.2}", total_spending.abs());
    if payment_count > 0 {
        println!(
            "Payments/Credits: ${:.2} ({} transactions)",
            total_payments.abs(),
            payment_count
        );
    }

    println!("\n{DASH}");
    println!("BY CATEGORY:");
    println!("{DASH}");
    for (category, total) in totals_by_category(transactions, true) {
        let percentage = if total_spending != 0.0 {
            total / total_spending * 100.0
        } else {
            0.0
        };
        println!("{category:25} ${total:10.2} ({percentage:5.1}%)");
    }

    println!("\n{DASH}");
    println!("BY CARD:");
    println!("{DASH}");
    for (card, total) in totals_by_card(transactions, true) {
        let percentage = if total_spending != 0.0 {
            total / total_spending * 100.0
        } else {
            0.0
        };
        println!("{card:25} ${total:10.2} ({percentage:5.1}%)");
    }
    println!("\n{RULE}");
}

pub fn print_detailed(transactions: &[Transaction], category_filter: Option<&str>) {
    let filtered: Vec<&Transaction> = match category_filter {
        Some(label) => transactions
            .iter()
            .filter(|t| t.display_category() == label)
            .collect(),
        None => transactions.iter().collect(),
    };

    println!("\n{RULE}");
    match category_filter {
        Some(label) => println!("TRANSACTIONS - {label}"),
        None => println!("ALL TRANSACTIONS"),
    }
    println!("{RULE}");

    for t in &filtered {
        println!("{t}");
    }

    let total: f64 = filtered.iter().map(|t| t.amount).sum();
    println!("{DASH}");
    println!("Total: ${:.2} ({} transactions)", total, filtered.len());
    println!("{RULE}");
}
