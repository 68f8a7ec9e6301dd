//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const FAILURE: i32 = 1;

    /// Resource not found (config, ledger, user, transaction).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Login failed (unknown email or wrong password).
    pub const AUTH_FAILED: i32 = 5;

    /// Integrity check failed.
    pub const INTEGRITY_FAILED: i32 = 6;

    /// The ledger file could not be migrated or is from a newer build.
    pub const SCHEMA_FAILED: i32 = 7;
}

/// Suggested expense categories.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Education",
    "Travel",
    "Other",
];

/// Suggested income categories.
pub const INCOME_CATEGORIES: &[&str] = &["Salary", "Business", "Investment", "Gift", "Other"];

/// Default number of rows shown by `tally list`.
pub const DEFAULT_LIST_LIMIT: usize = 20;
