//! Path and user resolution for config and ledger files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, TallyConfig};

/// Resolve the config file path, checking TALLY_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("TALLY_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the ledger file path from `--ledger`/TALLY_PATH, then the config.
pub fn resolve_ledger_path(cli: &Cli, config: Option<&TallyConfig>) -> Option<PathBuf> {
    cli.ledger
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| config.map(|c| PathBuf::from(&c.ledger.path)))
}

/// Resolve the acting username from `--user`/TALLY_USER, then the config.
pub fn resolve_username(cli: &Cli, config: Option<&TallyConfig>) -> Option<String> {
    cli.user
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .or_else(|| config.and_then(|c| c.user.default.clone()))
}

/// Error message when the ledger file is missing.
pub fn missing_ledger_message(path: &Path) -> String {
    format!("No ledger found at {}", path.display())
}

/// Error message when neither a flag nor a config names a ledger.
pub fn missing_config_message(config_path: &Path) -> String {
    format!(
        "No ledger configured (looked for {})",
        config_path.display()
    )
}

pub const INIT_HINT: &str =
    "Hint: Run `tally init`, or point at a ledger with --ledger / TALLY_PATH.";

pub const USER_HINT: &str =
    "Hint: Run `tally signup` or `tally login`, or pass --user / set TALLY_USER.";
