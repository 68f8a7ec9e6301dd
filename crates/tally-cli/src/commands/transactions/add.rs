use chrono::Local;
use tally_core::TransactionKind;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::constants::{EXPENSE_CATEGORIES, INCOME_CATEGORIES};
use crate::errors::CliError;
use crate::helpers::{parse_amount, parse_date};
use crate::ui::format::amount;
use crate::ui::{print, receipt};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let kind = args
        .kind
        .kind()
        .ok_or_else(|| CliError::invalid_input("Pass --expense or --income"))?;
    let value = parse_amount(&args.amount, kind)?;

    let category = args.category.trim();
    if category.is_empty() {
        return Err(CliError::invalid_input("--category cannot be empty").into());
    }
    let suggested = match kind {
        TransactionKind::Expense => EXPENSE_CATEGORIES,
        TransactionKind::Income => INCOME_CATEGORIES,
    };
    if !suggested.contains(&category) {
        debug!(category, %kind, "category is not one of the suggested ones");
    }

    let description = match args.description.as_deref().map(str::trim) {
        Some("") => return Err(CliError::invalid_input("--description cannot be empty").into()),
        Some(text) => text,
        None => category,
    };
    let date = match args.date.as_deref() {
        Some(value) => parse_date(value)?,
        None => Local::now().date_naive(),
    };

    let ledger = ctx.open_ledger()?;
    let user = ctx.current_user(&ledger)?;
    let id = ledger.create_transaction(user.id, value, category, description, date)?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        print(
            &ui,
            &receipt(
                &ui,
                "Added transaction",
                &[
                    ("ID", id.to_string()),
                    ("Amount", amount(&ui, &value)),
                    ("Category", category.to_string()),
                    ("Date", date.to_string()),
                ],
            ),
        );
    }
    Ok(())
}
