//! Transaction commands: add, list, show, edit, delete, clear, categories.

mod add;
mod categories;
mod delete;
mod edit;
mod list;
mod show;

pub use add::handle_add;
pub use categories::handle_categories;
pub use delete::{handle_clear, handle_delete};
pub use edit::handle_edit;
pub use list::handle_list;
pub use show::handle_show;

use tally_core::{Ledger, Transaction, TransactionId, User};

use crate::errors::CliError;

const LIST_HINT: &str = "Hint: Run `tally list` to find transaction IDs.";

/// Fetch a transaction that belongs to `user`.
///
/// Another user's transaction is reported exactly like a missing one.
fn owned_transaction(ledger: &Ledger, user: &User, id: i64) -> anyhow::Result<Transaction> {
    ledger
        .get_transaction(TransactionId(id))?
        .filter(|tx| tx.user_id == user.id)
        .ok_or_else(|| {
            CliError::not_found(format!("Transaction {} not found", id), LIST_HINT).into()
        })
}
