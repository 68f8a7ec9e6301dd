//! Aggregation over fetched transactions.
//!
//! Everything here is a pure function of its input slice. Results are
//! `Decimal`, so the same transactions always produce the same digits
//! regardless of order or how often the functions run.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::amount::TransactionKind;
use crate::storage::types::Transaction;

fn of_kind(txs: &[Transaction], kind: TransactionKind) -> impl Iterator<Item = &Transaction> {
    txs.iter().filter(move |tx| tx.amount.kind() == kind)
}

fn sum_of_kind(txs: &[Transaction], kind: TransactionKind) -> Decimal {
    of_kind(txs, kind).map(|tx| tx.amount.magnitude()).sum()
}

/// Income minus expense.
pub fn total_balance(txs: &[Transaction]) -> Decimal {
    txs.iter().map(|tx| tx.amount.signed()).sum()
}

pub fn total_expense(txs: &[Transaction]) -> Decimal {
    sum_of_kind(txs, TransactionKind::Expense)
}

pub fn total_income(txs: &[Transaction]) -> Decimal {
    sum_of_kind(txs, TransactionKind::Income)
}

/// Summed magnitude per category, for one kind only.
pub fn category_breakdown(txs: &[Transaction], kind: TransactionKind) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for tx in of_kind(txs, kind) {
        *totals.entry(tx.category.clone()).or_insert(Decimal::ZERO) += tx.amount.magnitude();
    }
    totals
}

/// Largest magnitude of the given kind, or zero when there is none.
pub fn highest(txs: &[Transaction], kind: TransactionKind) -> Decimal {
    of_kind(txs, kind)
        .map(|tx| tx.amount.magnitude())
        .max()
        .unwrap_or(Decimal::ZERO)
}

/// Mean magnitude of the given kind, or zero when there is none.
pub fn average(txs: &[Transaction], kind: TransactionKind) -> Decimal {
    let (sum, count) = of_kind(txs, kind).fold((Decimal::ZERO, 0u64), |(sum, count), tx| {
        (sum + tx.amount.magnitude(), count + 1)
    });
    if count == 0 {
        return Decimal::ZERO;
    }
    sum / Decimal::from(count)
}

/// Number of transactions of either kind.
pub fn transaction_count(txs: &[Transaction]) -> usize {
    txs.len()
}

/// Dashboard totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub balance: Decimal,
    pub income: Decimal,
    pub expense: Decimal,
    pub count: usize,
}

impl Summary {
    pub fn from_transactions(txs: &[Transaction]) -> Self {
        Self {
            balance: total_balance(txs),
            income: total_income(txs),
            expense: total_expense(txs),
            count: transaction_count(txs),
        }
    }
}

/// Statistics and per-category breakdowns for the reports view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub count: usize,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub highest_income: Decimal,
    pub highest_expense: Decimal,
    pub average_income: Decimal,
    pub average_expense: Decimal,
    pub income_by_category: BTreeMap<String, Decimal>,
    pub expense_by_category: BTreeMap<String, Decimal>,
}

impl Report {
    pub fn from_transactions(txs: &[Transaction]) -> Self {
        use TransactionKind::{Expense, Income};

        Self {
            count: transaction_count(txs),
            total_income: total_income(txs),
            total_expense: total_expense(txs),
            highest_income: highest(txs, Income),
            highest_expense: highest(txs, Expense),
            average_income: average(txs, Income),
            average_expense: average(txs, Expense),
            income_by_category: category_breakdown(txs, Income),
            expense_by_category: category_breakdown(txs, Expense),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
