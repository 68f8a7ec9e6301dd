use anyhow::Context;
use tally_core::TransactionId;
use tracing::{info, warn};

use crate::app::AppContext;
use crate::cli::{ClearArgs, DeleteArgs};
use crate::helpers::confirm;
use crate::ui::{badge, print, Badge};

use super::owned_transaction;

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let user = ctx.current_user(&ledger)?;
    let tx = owned_transaction(&ledger, &user, args.id)?;

    ledger.delete_transaction(tx.id)?;
    info!(id = %tx.id, user = %user.id, "transaction deleted");

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        print(
            &ui,
            &badge(&ui, Badge::Ok, &format!("Deleted transaction {}", tx.id)),
        );
    }
    Ok(())
}

/// Delete every transaction of the current user.
pub fn handle_clear(ctx: &AppContext, args: &ClearArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let user = ctx.current_user(&ledger)?;
    let transactions = ledger.get_transactions(user.id)?;
    let ui = ctx.ui_context(false, None);

    if transactions.is_empty() {
        if !ctx.quiet() {
            print(&ui, &badge(&ui, Badge::Info, "Nothing to clear"));
        }
        return Ok(());
    }

    if !args.yes {
        let prompt = format!(
            "Delete all {} transactions of {}?",
            transactions.len(),
            user.username
        );
        if !confirm(&prompt)? {
            if !ctx.quiet() {
                print(&ui, &badge(&ui, Badge::Info, "Cancelled"));
            }
            return Ok(());
        }
    }

    let ids: Vec<TransactionId> = transactions.iter().map(|tx| tx.id).collect();
    let deleted = delete_each(&ids, |id| ledger.delete_transaction(id))?;
    info!(user = %user.id, count = deleted, "transactions cleared");

    if !ctx.quiet() {
        print(
            &ui,
            &badge(
                &ui,
                Badge::Ok,
                &format!("Deleted {} transactions", deleted),
            ),
        );
    }
    Ok(())
}

/// Delete `ids` one at a time and return how many were removed.
///
/// A failure stops the loop; the error names how far it got, since the
/// rows deleted before it stay deleted.
fn delete_each<F>(ids: &[TransactionId], mut delete: F) -> anyhow::Result<usize>
where
    F: FnMut(TransactionId) -> tally_core::Result<()>,
{
    let total = ids.len();
    for (deleted, id) in ids.iter().enumerate() {
        if let Err(err) = delete(*id) {
            warn!(id = %id, deleted, total, "clear stopped early");
            return Err(err).with_context(|| {
                format!(
                    "Cleared {}/{} transactions before transaction {} failed",
                    deleted, total, id
                )
            });
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::exit_codes;
    use crate::errors::exit_code_for;
    use tally_core::LedgerError;

    fn ids(count: i64) -> Vec<TransactionId> {
        (1..=count).map(TransactionId).collect()
    }

    #[test]
    fn test_delete_each_removes_everything() {
        let mut seen = Vec::new();
        let deleted = delete_each(&ids(3), |id| {
            seen.push(id);
            Ok(())
        })
        .unwrap();
        assert_eq!(deleted, 3);
        assert_eq!(seen, ids(3));
    }

    #[test]
    fn test_delete_each_reports_progress_on_failure() {
        let mut attempts = 0;
        let err = delete_each(&ids(5), |id| {
            attempts += 1;
            if id == TransactionId(3) {
                Err(LedgerError::Storage("disk I/O error".to_string()))
            } else {
                Ok(())
            }
        })
        .unwrap_err();

        assert_eq!(attempts, 3);
        let message = format!("{:#}", err);
        assert!(message.starts_with("Cleared 2/5 transactions before transaction 3 failed"));
        assert!(message.contains("disk I/O error"));
        assert_eq!(exit_code_for(&err), exit_codes::FAILURE);
    }

    #[test]
    fn test_delete_each_keeps_the_core_exit_code() {
        let err = delete_each(&ids(2), |_| {
            Err(LedgerError::InvalidInput("bad id".to_string()))
        })
        .unwrap_err();
        assert!(format!("{:#}", err).starts_with("Cleared 0/2 transactions"));
        assert_eq!(exit_code_for(&err), exit_codes::INVALID_INPUT);
    }
}
