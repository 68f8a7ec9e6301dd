use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::output::{print_transaction, transaction_json};
use crate::ui::{blank_line, header, print, print_json};

use super::owned_transaction;

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let user = ctx.current_user(&ledger)?;
    let tx = owned_transaction(&ledger, &user, args.id)?;

    let ui = ctx.ui_context(args.json, None);
    if ui.mode.is_json() {
        return print_json(&transaction_json(&tx));
    }

    if ui.mode.is_pretty() && !ctx.quiet() {
        print(&ui, &header(&ui, "show", None));
        blank_line(&ui);
    }
    print_transaction(&ui, &tx);
    Ok(())
}
