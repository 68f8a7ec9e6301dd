//! Output formatting helpers for the CLI.
//!
//! JSON shapes for transactions and reports, plus the table rows and
//! detail blocks used by the text modes.

use tally_core::{Report, Summary, Transaction};

use crate::ui::format::{amount, balance, money, timestamp, truncate};
use crate::ui::{kv, print, Column, UiContext};

/// Convert a transaction to JSON for output.
///
/// `amount` keeps the signed storage convention; `kind` spells it out.
pub fn transaction_json(tx: &Transaction) -> serde_json::Value {
    serde_json::json!({
        "id": tx.id,
        "user_id": tx.user_id,
        "kind": tx.amount.kind(),
        "amount": tx.amount,
        "category": tx.category,
        "description": tx.description,
        "date": tx.date,
        "created_at": tx.created_at,
    })
}

pub fn transactions_json(txs: &[Transaction]) -> Vec<serde_json::Value> {
    txs.iter().map(transaction_json).collect()
}

pub const TRANSACTION_COLUMNS: [Column; 5] = [
    Column::numeric("ID"),
    Column::new("Date"),
    Column::new("Category"),
    Column::new("Description"),
    Column::numeric("Amount"),
];

/// Table rows for `tally list`, in the order given.
pub fn transaction_rows(ui: &UiContext, txs: &[Transaction]) -> Vec<Vec<String>> {
    txs.iter()
        .map(|tx| {
            let description = if ui.mode.is_pretty() {
                truncate(&tx.description, 40)
            } else {
                tx.description.clone()
            };
            vec![
                tx.id.to_string(),
                tx.date.to_string(),
                tx.category.clone(),
                description,
                amount(ui, &tx.amount),
            ]
        })
        .collect()
}

/// Print a single transaction as key-value lines.
pub fn print_transaction(ui: &UiContext, tx: &Transaction) {
    let pretty = ui.mode.is_pretty();
    print(ui, &kv(ui, "ID", &tx.id.to_string()));
    print(ui, &kv(ui, "Kind", tx.amount.kind().as_str()));
    print(ui, &kv(ui, "Amount", &amount(ui, &tx.amount)));
    print(ui, &kv(ui, "Category", &tx.category));
    print(ui, &kv(ui, "Description", &tx.description));
    print(ui, &kv(ui, "Date", &tx.date.to_string()));
    print(ui, &kv(ui, "Created", &timestamp(&tx.created_at, pretty)));
}

pub fn print_summary(ui: &UiContext, summary: &Summary) {
    print(ui, &kv(ui, "Balance", &balance(ui, summary.balance)));
    print(ui, &kv(ui, "Income", &money(summary.income)));
    print(ui, &kv(ui, "Expense", &money(summary.expense)));
    print(ui, &kv(ui, "Transactions", &summary.count.to_string()));
}

pub const BREAKDOWN_COLUMNS: [Column; 2] = [Column::new("Category"), Column::numeric("Total")];

/// Category rows sorted by total, largest first, then by name.
pub fn breakdown_rows<'a>(
    breakdown: impl IntoIterator<Item = (&'a String, &'a rust_decimal::Decimal)>,
) -> Vec<Vec<String>> {
    let mut entries: Vec<_> = breakdown.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    entries
        .into_iter()
        .map(|(category, total)| vec![category.clone(), money(*total)])
        .collect()
}

pub fn print_statistics(ui: &UiContext, report: &Report) {
    print(ui, &kv(ui, "Transactions", &report.count.to_string()));
    print(ui, &kv(ui, "Total Income", &money(report.total_income)));
    print(ui, &kv(ui, "Total Expense", &money(report.total_expense)));
    print(ui, &kv(ui, "Highest Income", &money(report.highest_income)));
    print(ui, &kv(ui, "Highest Expense", &money(report.highest_expense)));
    print(ui, &kv(ui, "Average Income", &money(report.average_income)));
    print(ui, &kv(ui, "Average Expense", &money(report.average_expense)));
}
