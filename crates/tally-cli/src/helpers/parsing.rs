//! Parsing helpers for amounts, dates, and output format.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_core::{Amount, TransactionKind};

use crate::errors::CliError;

/// Parse a positive decimal magnitude such as `45.50`.
///
/// The direction of money is never taken from the sign; callers pair the
/// magnitude with `--expense` or `--income`.
pub fn parse_magnitude(value: &str) -> anyhow::Result<Decimal> {
    let trimmed = value.trim();
    let parsed = Decimal::from_str(trimmed).map_err(|_| {
        CliError::invalid_input(format!(
            "Invalid amount: {} (expected a number like 45.50)",
            value
        ))
    })?;
    if parsed.is_sign_negative() {
        return Err(CliError::invalid_input(format!(
            "Amount must be positive: {}\nHint: Use --expense or --income to set the direction.",
            value
        ))
        .into());
    }
    if parsed.is_zero() {
        return Err(CliError::invalid_input("Amount must not be zero").into());
    }
    Ok(parsed)
}

/// Parse a magnitude and tag it with a direction.
pub fn parse_amount(value: &str, kind: TransactionKind) -> anyhow::Result<Amount> {
    let magnitude = parse_magnitude(value)?;
    Ok(Amount::new(kind, magnitude)?)
}

/// Parse a calendar day (YYYY-MM-DD).
pub fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        CliError::invalid_input(format!("Invalid date (expected YYYY-MM-DD): {}", value)).into()
    })
}

/// Output format for the list command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Plain,
}

/// Parse output format string.
pub fn parse_output_format(value: Option<&str>) -> anyhow::Result<Option<OutputFormat>> {
    match value {
        None => Ok(None),
        Some("table") => Ok(Some(OutputFormat::Table)),
        Some("plain") => Ok(Some(OutputFormat::Plain)),
        Some(other) => Err(CliError::invalid_input(format!(
            "Unsupported format: {} (use table or plain)",
            other
        ))
        .into()),
    }
}
