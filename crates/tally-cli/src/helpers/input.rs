//! Interactive input helpers for passwords and confirmations.

use std::io::IsTerminal;

use dialoguer::{Confirm, Password};

use crate::errors::CliError;

fn password_from_env() -> Option<String> {
    std::env::var("TALLY_PASSWORD")
        .ok()
        .filter(|value| !value.is_empty())
}

/// Resolve a password from the flag, TALLY_PASSWORD, or a prompt.
pub fn prompt_password(flag: Option<&str>) -> anyhow::Result<String> {
    if let Some(value) = flag {
        return Ok(value.to_string());
    }
    if let Some(value) = password_from_env() {
        return Ok(value);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::invalid_input(
            "No password provided and no TTY available. Use --password or set TALLY_PASSWORD.",
        )
        .into());
    }
    Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Like `prompt_password`, but an interactive prompt asks twice.
pub fn prompt_signup_password(flag: Option<&str>) -> anyhow::Result<String> {
    if let Some(value) = flag {
        return Ok(value.to_string());
    }
    if let Some(value) = password_from_env() {
        return Ok(value);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::invalid_input(
            "No password provided and no TTY available. Use --password or set TALLY_PASSWORD.",
        )
        .into());
    }
    Password::new()
        .with_prompt("Choose a password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Ask a yes/no question. Refuses without a TTY.
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::invalid_input(
            "Confirmation required but no TTY available.\nHint: Pass --yes to skip the prompt.",
        )
        .into());
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}
