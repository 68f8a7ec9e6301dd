use tally_core::TransactionKind;

use crate::app::AppContext;
use crate::cli::CategoriesArgs;
use crate::constants::{EXPENSE_CATEGORIES, INCOME_CATEGORIES};
use crate::ui::{blank_line, print, OutputMode};

fn categories_for(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Expense => EXPENSE_CATEGORIES,
        TransactionKind::Income => INCOME_CATEGORIES,
    }
}

/// Print the suggested categories, one per line.
///
/// Plain mode prefixes each line with its kind so the output stays greppable.
pub fn handle_categories(ctx: &AppContext, args: &CategoriesArgs) -> anyhow::Result<()> {
    let kinds = match args.kind.kind() {
        Some(kind) => vec![kind],
        None => vec![TransactionKind::Expense, TransactionKind::Income],
    };
    let ui = ctx.ui_context(false, None);

    for (index, kind) in kinds.iter().enumerate() {
        if ui.mode == OutputMode::Pretty {
            if index > 0 {
                blank_line(&ui);
            }
            let title = match kind {
                TransactionKind::Expense => "Expense categories",
                TransactionKind::Income => "Income categories",
            };
            print(&ui, title);
            for category in categories_for(*kind) {
                print(&ui, &format!("  {}", category));
            }
        } else {
            for category in categories_for(*kind) {
                print(&ui, &format!("{}={}", kind.as_str(), category));
            }
        }
    }
    Ok(())
}
