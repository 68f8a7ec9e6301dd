//! String formatting utilities for money and text.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use tally_core::{Amount, TransactionKind};

use super::context::UiContext;
use super::theme::{styled, styles};

/// Format money with two decimal places, rounding half away from zero.
pub fn money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Signed amount, `+` for income and `-` for expense, colored in pretty mode.
pub fn amount(ctx: &UiContext, amount: &Amount) -> String {
    let (sign, style) = match amount.kind() {
        TransactionKind::Income => ("+", styles::income()),
        TransactionKind::Expense => ("-", styles::expense()),
    };
    let text = format!("{}{}", sign, money(amount.magnitude()));
    if ctx.mode.is_pretty() {
        styled(&text, style, ctx.color)
    } else {
        text
    }
}

/// Balance colored by sign.
pub fn balance(ctx: &UiContext, value: Decimal) -> String {
    let text = money(value);
    if !ctx.mode.is_pretty() {
        return text;
    }
    let style = if value.is_sign_negative() && !value.is_zero() {
        styles::expense()
    } else {
        styles::income()
    };
    styled(&text, style, ctx.color)
}

pub fn timestamp(dt: &DateTime<Utc>, pretty: bool) -> String {
    if pretty {
        dt.format("%Y-%m-%d %H:%M UTC").to_string()
    } else {
        dt.to_rfc3339()
    }
}

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let head: String = s.chars().take(max_len - 3).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;
    use std::str::FromStr;

    fn plain_ctx() -> UiContext {
        UiContext {
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
        }
    }

    #[test]
    fn test_money_uses_two_places() {
        assert_eq!(money(Decimal::from(2000)), "2000.00");
        assert_eq!(money(Decimal::from_str("45.5").unwrap()), "45.50");
        assert_eq!(money(Decimal::from_str("1.005").unwrap()), "1.01");
        assert_eq!(money(Decimal::from_str("-1954.5").unwrap()), "-1954.50");
    }

    #[test]
    fn test_amount_sign_follows_kind() {
        let ctx = plain_ctx();
        let expense = Amount::expense(Decimal::from_str("45.50").unwrap()).unwrap();
        let income = Amount::income(Decimal::from(2000)).unwrap();
        assert_eq!(amount(&ctx, &expense), "-45.50");
        assert_eq!(amount(&ctx, &income), "+2000.00");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Dinner", 10), "Dinner");
        assert_eq!(truncate("A very long description", 10), "A very ...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
