use crate::app::AppContext;
use crate::cli::ReportArgs;
use crate::output::{breakdown_rows, print_statistics, print_summary, BREAKDOWN_COLUMNS};
use crate::ui::{blank_line, divider, header, hint, print, print_json, table, OutputMode};

pub fn handle_summary(ctx: &AppContext, args: &ReportArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let user = ctx.current_user(&ledger)?;
    let summary = ledger.summary(user.id)?;

    let ui = ctx.ui_context(args.json, None);
    if ui.mode.is_json() {
        return print_json(&summary);
    }

    if ui.mode == OutputMode::Pretty && !ctx.quiet() {
        print(&ui, &header(&ui, "summary", Some(&user.username)));
        blank_line(&ui);
    }
    print_summary(&ui, &summary);
    Ok(())
}

pub fn handle_report(ctx: &AppContext, args: &ReportArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let user = ctx.current_user(&ledger)?;
    let report = ledger.report(user.id)?;

    let ui = ctx.ui_context(args.json, None);
    if ui.mode.is_json() {
        return print_json(&report);
    }

    let pretty = ui.mode == OutputMode::Pretty;
    if pretty && !ctx.quiet() {
        print(&ui, &header(&ui, "report", Some(&user.username)));
        blank_line(&ui);
    }
    print_statistics(&ui, &report);

    if report.is_empty() {
        if pretty && !ctx.quiet() {
            blank_line(&ui);
            print(&ui, &hint(&ui, "No transactions yet. Add one with `tally add`."));
        }
        return Ok(());
    }

    if pretty {
        blank_line(&ui);
        print(&ui, &divider(&ui));
    }

    let sections = [
        ("Expense by category", "expense", &report.expense_by_category),
        ("Income by category", "income", &report.income_by_category),
    ];
    for (title, kind, breakdown) in sections {
        if breakdown.is_empty() {
            continue;
        }
        let rows = breakdown_rows(breakdown);
        if pretty {
            blank_line(&ui);
            print(&ui, title);
            print(&ui, &table(&ui, &BREAKDOWN_COLUMNS, &rows));
        } else {
            // kind|category=total keeps category names with spaces on one key.
            for row in rows {
                print(&ui, &format!("{}|{}={}", kind, row[0], row[1]));
            }
        }
    }
    Ok(())
}
