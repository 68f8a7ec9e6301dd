//! Tally CLI - a personal income and expense ledger for the terminal
//!
//! This is the command-line interface for Tally. It drives the ledger
//! engine in `tally-core` and renders results for people and scripts.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use tally_core::VERSION;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{init, maintenance, misc, reports, transactions, users};
use crate::errors::exit_code_for;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    init_tracing();
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false, None);

        let error_msg = format!("{:#}", e);
        let (message, hint) = split_error_hint(&error_msg);

        print_error(&ui_ctx, message, hint);
        std::process::exit(exit_code_for(&e));
    }
}

/// Log to stderr, filtered by TALLY_LOG (defaults to warnings only).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("TALLY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Split a trailing "Hint: ..." line off an error message.
fn split_error_hint(error: &str) -> (&str, Option<&str>) {
    match error.find("\nHint:") {
        Some(idx) => (&error[..idx], Some(&error[idx + 1..])),
        None => {
            let lower = error.to_lowercase();
            let hint = if lower.contains("integrity check failed") {
                Some("Hint: Restore the ledger file from a backup before writing to it again.")
            } else if lower.contains("schema version") || lower.contains("migration") {
                Some("Hint: The ledger was left at its last good version. Use a newer tally build or restore a backup.")
            } else if lower.contains("username already exists") {
                Some("Hint: Pick another --username, or run `tally login`.")
            } else {
                None
            };
            (error, hint)
        }
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::Signup(args)) => {
            users::handle_signup(ctx, args)?;
        }
        Some(Commands::Login(args)) => {
            users::handle_login(ctx, args)?;
        }
        Some(Commands::Add(args)) => {
            transactions::handle_add(ctx, args)?;
        }
        Some(Commands::Edit(args)) => {
            transactions::handle_edit(ctx, args)?;
        }
        Some(Commands::List(args)) => {
            transactions::handle_list(ctx, args)?;
        }
        Some(Commands::Show(args)) => {
            transactions::handle_show(ctx, args)?;
        }
        Some(Commands::Delete(args)) => {
            transactions::handle_delete(ctx, args)?;
        }
        Some(Commands::Clear(args)) => {
            transactions::handle_clear(ctx, args)?;
        }
        Some(Commands::Categories(args)) => {
            transactions::handle_categories(ctx, args)?;
        }
        Some(Commands::Summary(args)) => {
            reports::handle_summary(ctx, args)?;
        }
        Some(Commands::Report(args)) => {
            reports::handle_report(ctx, args)?;
        }
        Some(Commands::Check) => {
            maintenance::handle_check(ctx)?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        None => {
            println!("Tally v{}", VERSION);
            println!("Personal income and expense ledger");
            println!();
            println!("Quickstart:");
            println!("  tally init");
            println!("  tally signup --username <name> --email <email>");
            println!("  tally add --amount 2000 --income --category Salary");
            println!("  tally add --amount 45.50 --expense --category \"Food & Dining\"");
            println!("  tally summary");
            println!();
            println!("Run `tally --help` for all commands.");
        }
    }
    Ok(())
}
