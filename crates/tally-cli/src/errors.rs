//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI. Core errors that
//! bubble up through `anyhow` are classified by `exit_code_for`.

use std::fmt;

use tally_core::LedgerError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, ledger, user, transaction)
    NotFound { message: String, hint: String },

    /// Login failed
    AuthFailed(String),

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => write!(f, "{}\n{}", message, hint),
            CliError::AuthFailed(message) => write!(f, "{}", message),
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed(_) => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

/// Exit code for a core error.
pub fn ledger_exit_code(err: &LedgerError) -> i32 {
    match err {
        LedgerError::MigrationFailed { .. } | LedgerError::UnsupportedSchemaVersion { .. } => {
            exit_codes::SCHEMA_FAILED
        }
        LedgerError::DuplicateUsername(_)
        | LedgerError::UnknownUser(_)
        | LedgerError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        LedgerError::Integrity(_) => exit_codes::INTEGRITY_FAILED,
        LedgerError::StorageUnavailable(_) | LedgerError::Storage(_) => exit_codes::FAILURE,
    }
}

/// Walk the error chain and pick the most specific exit code.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(cli) = cause.downcast_ref::<CliError>() {
            return cli.exit_code();
        }
        if let Some(ledger) = cause.downcast_ref::<LedgerError>() {
            return ledger_exit_code(ledger);
        }
    }
    exit_codes::FAILURE
}
