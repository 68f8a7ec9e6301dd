use clap::{ArgGroup, Args, Parser, Subcommand};
use clap_complete::Shell;

use tally_core::{TransactionKind, VERSION};

/// Tally - a personal income and expense ledger for the terminal
#[derive(Parser)]
#[command(name = "tally")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the ledger file
    #[arg(short, long, global = true, env = "TALLY_PATH")]
    pub ledger: Option<String>,

    /// Username to act as
    #[arg(short, long, global = true, env = "TALLY_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols instead of unicode
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the ledger will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,
}

/// Arguments for the `signup` command
#[derive(Args)]
pub struct SignupArgs {
    /// Unique username
    #[arg(long)]
    pub username: String,

    /// Email address used by `login`
    #[arg(long)]
    pub email: String,

    /// Password (prompted when omitted and TALLY_PASSWORD is unset)
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for the `login` command
#[derive(Args)]
pub struct LoginArgs {
    /// Email address given at signup
    #[arg(long)]
    pub email: String,

    /// Password (prompted when omitted and TALLY_PASSWORD is unset)
    #[arg(long)]
    pub password: Option<String>,
}

/// Income or expense selector shared by `add` and `edit`
#[derive(Args, Clone, Copy, Default)]
pub struct KindArgs {
    /// Record money going out
    #[arg(long, conflicts_with = "income")]
    pub expense: bool,

    /// Record money coming in
    #[arg(long)]
    pub income: bool,
}

impl KindArgs {
    pub fn kind(&self) -> Option<TransactionKind> {
        match (self.expense, self.income) {
            (true, _) => Some(TransactionKind::Expense),
            (_, true) => Some(TransactionKind::Income),
            _ => None,
        }
    }
}

/// Arguments for the `add` command
#[derive(Args)]
#[command(group(ArgGroup::new("direction").required(true).args(["expense", "income"])))]
pub struct AddArgs {
    /// Amount (positive; the direction comes from --expense or --income)
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,

    #[command(flatten)]
    pub kind: KindArgs,

    /// Category (see `tally categories`)
    #[arg(short, long)]
    pub category: String,

    /// Description (defaults to the category)
    #[arg(short, long)]
    pub description: Option<String>,

    /// Calendar day (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Transaction ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// New amount (keeps the current direction unless --expense or --income is given)
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Option<String>,

    #[command(flatten)]
    pub kind: KindArgs,

    /// New category
    #[arg(short, long)]
    pub category: Option<String>,

    /// New description
    #[arg(short, long)]
    pub description: Option<String>,

    /// New calendar day (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Show every transaction
    #[arg(long, conflicts_with = "limit")]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Transaction ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Transaction ID
    #[arg(value_name = "ID")]
    pub id: i64,
}

/// Arguments for the `clear` command
#[derive(Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

/// Arguments for the `categories` command
#[derive(Args)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub kind: KindArgs,
}

/// Arguments for the `summary` and `report` commands
#[derive(Args)]
pub struct ReportArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create (or migrate) a ledger and write the config
    Init(InitArgs),

    /// Create a user
    Signup(SignupArgs),

    /// Check credentials and make the user the default
    Login(LoginArgs),

    /// Record an income or expense
    Add(AddArgs),

    /// Change an existing transaction
    Edit(EditArgs),

    /// List transactions, newest first
    List(ListArgs),

    /// Show a specific transaction by ID
    Show(ShowArgs),

    /// Delete a transaction
    Delete(DeleteArgs),

    /// Delete every transaction of the current user
    Clear(ClearArgs),

    /// Show suggested categories
    Categories(CategoriesArgs),

    /// Balance, income and expense totals
    Summary(ReportArgs),

    /// Statistics and per-category breakdowns
    Report(ReportArgs),

    /// Check ledger integrity
    Check,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_requires_a_direction() {
        let parsed = Cli::try_parse_from(["tally", "add", "--amount", "5", "--category", "Food"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from([
            "tally", "add", "--amount", "5", "--category", "Food", "--expense", "--income",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_add_parses_expense() {
        let cli = Cli::try_parse_from([
            "tally",
            "--user",
            "sam",
            "add",
            "--amount",
            "45.50",
            "--expense",
            "--category",
            "Food & Dining",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.kind.kind(), Some(TransactionKind::Expense));
                assert_eq!(args.amount, "45.50");
                assert!(args.description.is_none());
            }
            _ => panic!("expected add"),
        }
        assert_eq!(cli.user.as_deref(), Some("sam"));
    }

    #[test]
    fn test_edit_direction_is_optional() {
        let cli = Cli::try_parse_from(["tally", "edit", "3", "--category", "Travel"]).unwrap();
        match cli.command {
            Some(Commands::Edit(args)) => {
                assert_eq!(args.id, 3);
                assert!(args.kind.kind().is_none());
            }
            _ => panic!("expected edit"),
        }
    }
}
