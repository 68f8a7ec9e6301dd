use tally_core::Amount;

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::errors::CliError;
use crate::helpers::{parse_amount, parse_date};
use crate::ui::format::amount;
use crate::ui::{print, receipt};

use super::owned_transaction;

fn non_blank(flag: &str, value: &str) -> anyhow::Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CliError::invalid_input(format!("--{} cannot be empty", flag)).into());
    }
    Ok(trimmed.to_string())
}

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let nothing_to_change = args.amount.is_none()
        && args.kind.kind().is_none()
        && args.category.is_none()
        && args.description.is_none()
        && args.date.is_none();
    if nothing_to_change {
        return Err(CliError::invalid_input(
            "Nothing to change.\nHint: Pass --amount, --expense/--income, --category, --description or --date.",
        )
        .into());
    }

    let ledger = ctx.open_ledger()?;
    let user = ctx.current_user(&ledger)?;
    let mut tx = owned_transaction(&ledger, &user, args.id)?;

    let kind = args.kind.kind().unwrap_or(tx.amount.kind());
    tx.amount = match args.amount.as_deref() {
        Some(value) => parse_amount(value, kind)?,
        None => Amount::new(kind, tx.amount.magnitude())?,
    };
    if let Some(category) = args.category.as_deref() {
        tx.category = non_blank("category", category)?;
    }
    if let Some(description) = args.description.as_deref() {
        tx.description = non_blank("description", description)?;
    }
    if let Some(date) = args.date.as_deref() {
        tx.date = parse_date(date)?;
    }

    if ledger.update_transaction(&tx)? == 0 {
        return Err(CliError::not_found(
            format!("Transaction {} not found", args.id),
            "Hint: It may have been deleted in the meantime.",
        )
        .into());
    }

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        print(
            &ui,
            &receipt(
                &ui,
                "Updated transaction",
                &[
                    ("ID", tx.id.to_string()),
                    ("Amount", amount(&ui, &tx.amount)),
                    ("Category", tx.category.clone()),
                    ("Description", tx.description.clone()),
                    ("Date", tx.date.to_string()),
                ],
            ),
        );
    }
    Ok(())
}
