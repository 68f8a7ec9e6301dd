use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::constants::DEFAULT_LIST_LIMIT;
use crate::errors::CliError;
use crate::helpers::{parse_output_format, OutputFormat};
use crate::output::{transaction_rows, transactions_json, TRANSACTION_COLUMNS};
use crate::ui::{blank_line, header, hint, print, print_json, table, OutputMode};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let format = parse_output_format(args.format.as_deref())?;
    if args.json && format.is_some() {
        return Err(CliError::invalid_input("--format cannot be used with --json").into());
    }

    let ledger = ctx.open_ledger()?;
    let user = ctx.current_user(&ledger)?;

    let mut transactions = ledger.get_transactions(user.id)?;
    let total = transactions.len();
    if !args.all {
        transactions.truncate(args.limit.unwrap_or(DEFAULT_LIST_LIMIT));
    }

    let format_flag = match format {
        Some(OutputFormat::Plain) => Some("plain"),
        Some(OutputFormat::Table) => Some("table"),
        None => None,
    };
    let ui = ctx.ui_context(args.json, format_flag);

    if ui.mode.is_json() {
        return print_json(&transactions_json(&transactions));
    }

    if ui.mode == OutputMode::Pretty && !ctx.quiet() {
        print(&ui, &header(&ui, "list", Some(&user.username)));
        blank_line(&ui);
    }

    if transactions.is_empty() {
        if !ctx.quiet() {
            print(&ui, &hint(&ui, "No transactions yet. Add one with `tally add`."));
        }
        return Ok(());
    }

    print(&ui, &table(&ui, &TRANSACTION_COLUMNS, &transaction_rows(&ui, &transactions)));

    if ui.mode == OutputMode::Pretty && !ctx.quiet() && transactions.len() < total {
        blank_line(&ui);
        print(
            &ui,
            &hint(
                &ui,
                &format!(
                    "Showing {} of {} transactions. Use --all to see everything.",
                    transactions.len(),
                    total
                ),
            ),
        );
    }
    Ok(())
}
