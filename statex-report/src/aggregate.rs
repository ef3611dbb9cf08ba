//! Aggregator: ranks descriptions by summed amount for reporting.

use rust_decimal::Decimal;
use serde::Serialize;
use statex_core::{Currency, TransactionRecord};
use std::collections::HashMap;

pub const DEFAULT_TOP_N: usize = 20;

/// Description-grouped total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRow {
    pub description: String,
    pub total_amount: Decimal,
    /// Partition the row was computed in; `None` when unpartitioned
    pub currency: Option<Currency>,
}

/// Ranked rows of one currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyPartition {
    pub currency: Currency,
    pub rows: Vec<AggregateRow>,
}

/// Sum amounts per description, keeping first-occurrence order.
fn group_totals<'a>(items: impl Iterator<Item = (&'a str, Decimal)>) -> Vec<(&'a str, Decimal)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, Decimal)> = Vec::new();

    for (description, amount) in items {
        match index.get(description) {
            Some(&i) => totals[i].1 += amount,
            None => {
                index.insert(description, totals.len());
                totals.push((description, amount));
            }
        }
    }
    totals
}

fn rank(totals: Vec<(&str, Decimal)>, n: usize, currency: Option<Currency>) -> Vec<AggregateRow> {
    let mut rows: Vec<AggregateRow> = totals
        .into_iter()
        .map(|(description, total_amount)| AggregateRow {
            description: description.to_string(),
            total_amount,
            currency,
        })
        .collect();

    // stable: equal totals keep first-occurrence order
    rows.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
    rows.truncate(n);
    rows
}

/// Top `n` descriptions by summed `amount`, across all records.
///
/// Zero and negative totals are kept.
pub fn aggregate_top(records: &[TransactionRecord], n: usize) -> Vec<AggregateRow> {
    let totals = group_totals(records.iter().map(|r| (r.description.as_str(), r.amount)));
    rank(totals, n, None)
}

/// Top `n` descriptions per currency, partitions in first-seen order.
///
/// A dual-column record counts towards both of its currencies.
pub fn aggregate_top_by_currency(records: &[TransactionRecord], n: usize) -> Vec<CurrencyPartition> {
    let mut currencies: Vec<Currency> = Vec::new();
    for currency in records.iter().flat_map(TransactionRecord::currencies) {
        if !currencies.contains(&currency) {
            currencies.push(currency);
        }
    }

    currencies
        .into_iter()
        .map(|currency| {
            let totals = group_totals(
                records
                    .iter()
                    .filter_map(|r| r.amount_in(currency).map(|a| (r.description.as_str(), a))),
            );
            CurrencyPartition {
                currency,
                rows: rank(totals, n, Some(currency)),
            }
        })
        .collect()
}

/// Rows worth charting: strictly positive totals.
///
/// Reporting-layer filter; the aggregation functions never apply it.
pub fn positive_only(rows: &[AggregateRow]) -> Vec<AggregateRow> {
    rows.iter().filter(|r| r.total_amount > Decimal::ZERO).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use statex_core::Money;

    fn rec(desc: &str, amount: i64) -> TransactionRecord {
        TransactionRecord::new("01Jan", "01Jan", desc, "CONSUMO", Decimal::from(amount), Currency::Pen)
    }

    fn summary(rows: &[AggregateRow]) -> Vec<(&str, Decimal)> {
        rows.iter().map(|r| (r.description.as_str(), r.total_amount)).collect()
    }

    #[test]
    fn test_group_sum_sort() {
        let records = vec![rec("A", 10), rec("B", 30), rec("A", 5)];
        let rows = aggregate_top(&records, DEFAULT_TOP_N);
        assert_eq!(summary(&rows), vec![("B", Decimal::from(30)), ("A", Decimal::from(15))]);
        assert!(rows.iter().all(|r| r.currency.is_none()));
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        let records = vec![rec("X", 5), rec("Y", 10), rec("Z", 10), rec("X", 5)];
        let rows = aggregate_top(&records, DEFAULT_TOP_N);
        assert_eq!(
            summary(&rows),
            vec![("X", Decimal::from(10)), ("Y", Decimal::from(10)), ("Z", Decimal::from(10))]
        );
    }

    #[test]
    fn test_truncates_to_n() {
        let records: Vec<_> = (0..30).map(|i| rec(&format!("M{i:02}"), i)).collect();
        let rows = aggregate_top(&records, DEFAULT_TOP_N);
        assert_eq!(rows.len(), 20);
        assert_eq!(rows[0].description, "M29");
        assert_eq!(rows[19].description, "M10");

        assert_eq!(aggregate_top(&records, 3).len(), 3);
        assert!(aggregate_top(&[], DEFAULT_TOP_N).is_empty());
    }

    #[test]
    fn test_non_positive_totals_are_kept() {
        let records = vec![rec("REFUND", -20), rec("ZERO", 5), rec("ZERO", -5), rec("SHOP", 7)];
        let rows = aggregate_top(&records, DEFAULT_TOP_N);
        assert_eq!(
            summary(&rows),
            vec![("SHOP", Decimal::from(7)), ("ZERO", Decimal::ZERO), ("REFUND", Decimal::from(-20))]
        );

        let charted = positive_only(&rows);
        assert_eq!(summary(&charted), vec![("SHOP", Decimal::from(7))]);
    }

    #[test]
    fn test_partition_by_currency() {
        let dual = |desc: &str, pen: i64, usd: i64| {
            rec(desc, pen).with_secondary(Money::new(Currency::Usd, Decimal::from(usd)))
        };
        let records = vec![dual("WONG", 100, 0), dual("AMAZON", 0, 40), dual("WONG", 50, 0), dual("STEAM", 0, 60)];

        let parts = aggregate_top_by_currency(&records, DEFAULT_TOP_N);
        assert_eq!(parts.len(), 2);

        assert_eq!(parts[0].currency, Currency::Pen);
        assert_eq!(
            summary(&parts[0].rows),
            vec![("WONG", Decimal::from(150)), ("AMAZON", Decimal::ZERO), ("STEAM", Decimal::ZERO)]
        );

        assert_eq!(parts[1].currency, Currency::Usd);
        assert_eq!(
            summary(&parts[1].rows),
            vec![("STEAM", Decimal::from(60)), ("AMAZON", Decimal::from(40)), ("WONG", Decimal::ZERO)]
        );
        assert!(parts[1].rows.iter().all(|r| r.currency == Some(Currency::Usd)));
    }

    #[test]
    fn test_partition_single_amount_records() {
        let mut usd = rec("AMAZON", 20);
        usd.currency = Currency::Usd;
        let records = vec![rec("WONG", 10), usd, rec("WONG", 1)];

        let parts = aggregate_top_by_currency(&records, DEFAULT_TOP_N);
        assert_eq!(parts.len(), 2);
        assert_eq!(summary(&parts[0].rows), vec![("WONG", Decimal::from(11))]);
        assert_eq!(summary(&parts[1].rows), vec![("AMAZON", Decimal::from(20))]);
    }
}
