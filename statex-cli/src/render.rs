//! Plain-text output for the terminal

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use statex_core::TransactionRecord;
use statex_report::AggregateRow;

pub fn print_records(records: &[TransactionRecord]) {
    for r in records {
        let country = r.country_code.as_deref().unwrap_or("--");
        let secondary = r
            .secondary
            .map(|m| format!("  {} {}", m.currency.code(), m.amount))
            .unwrap_or_default();
        println!(
            "{} {} | {:<40} | {} | {:<9} | {} {}{}",
            r.posting_date,
            r.transaction_date,
            r.description,
            country,
            r.operation_type,
            r.currency.code(),
            r.amount,
            secondary
        );
    }
}

/// Horizontal bars scaled to the largest total
pub fn print_ranking(title: &str, rows: &[AggregateRow]) {
    println!("\n## {title}\n");
    if rows.is_empty() {
        println!("(no transactions)");
        return;
    }

    let max = rows.iter().map(|r| r.total_amount).max().unwrap_or_default();
    for r in rows {
        let width = if max.is_zero() {
            0
        } else {
            (r.total_amount / max * Decimal::from(30))
                .round()
                .to_usize()
                .unwrap_or(0)
        };
        println!("{:<40} {:>12} {}", r.description, r.total_amount.round_dp(2).to_string(), "#".repeat(width));
    }
}
