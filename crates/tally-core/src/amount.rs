//! Tagged transaction amounts.
//!
//! Storage and the wire format keep the historical signed convention
//! (negative = expense, positive = income). Inside the crate an amount is
//! always a kind plus a strictly positive magnitude, so nothing downstream
//! has to branch on the sign.

use std::fmt;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Largest magnitude a single transaction may carry, in whole units.
///
/// Keeps every stored value inside the range an `f64` column holds to the
/// cent, and keeps sums over any realistic ledger far below `Decimal::MAX`.
pub const MAX_MAGNITUDE: i64 = 1_000_000_000_000;

/// A non-zero amount of money with an explicit direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount {
    kind: TransactionKind,
    magnitude: Decimal,
}

impl Amount {
    /// Build an amount from a kind and a magnitude.
    ///
    /// The sign of `magnitude` is ignored; only its absolute value is kept.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidInput` if the magnitude is zero or
    /// larger than [`MAX_MAGNITUDE`].
    pub fn new(kind: TransactionKind, magnitude: Decimal) -> Result<Self> {
        if magnitude.is_zero() {
            return Err(LedgerError::InvalidInput(
                "Amount must not be zero".to_string(),
            ));
        }
        if magnitude.abs() > Decimal::from(MAX_MAGNITUDE) {
            return Err(LedgerError::InvalidInput(format!(
                "Amount out of range: {} (limit is {})",
                magnitude.abs(),
                MAX_MAGNITUDE
            )));
        }
        Ok(Self {
            kind,
            magnitude: magnitude.abs(),
        })
    }

    pub fn income(magnitude: Decimal) -> Result<Self> {
        Self::new(TransactionKind::Income, magnitude)
    }

    pub fn expense(magnitude: Decimal) -> Result<Self> {
        Self::new(TransactionKind::Expense, magnitude)
    }

    /// Interpret a signed value: negative is an expense, positive is income.
    pub fn from_signed(value: Decimal) -> Result<Self> {
        let kind = if value.is_sign_negative() {
            TransactionKind::Expense
        } else {
            TransactionKind::Income
        };
        Self::new(kind, value)
    }

    /// Convert a stored `REAL` column value.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(LedgerError::InvalidInput(format!(
                "Amount is not a finite number: {}",
                value
            )));
        }
        let decimal = Decimal::from_f64(value).ok_or_else(|| {
            LedgerError::InvalidInput(format!("Amount out of range: {}", value))
        })?;
        Self::from_signed(decimal)
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn magnitude(&self) -> Decimal {
        self.magnitude
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// The signed value used at the storage and wire boundary.
    pub fn signed(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.magnitude,
            TransactionKind::Expense => -self.magnitude,
        }
    }

    /// Convert for a `REAL` column.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidInput` when the value would not read
    /// back unchanged, e.g. because it carries more digits than an `f64`
    /// keeps.
    pub fn to_f64(&self) -> Result<f64> {
        let signed = self.signed();
        let value = signed
            .to_f64()
            .filter(|value| Decimal::from_f64(*value) == Some(signed))
            .ok_or_else(|| {
                LedgerError::InvalidInput(format!(
                    "Amount cannot be stored exactly: {}",
                    signed
                ))
            })?;
        Ok(value)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::from_signed(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.signed()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_from_signed_classifies_by_sign() {
        let expense = Amount::from_signed(dec("-45.50")).unwrap();
        assert_eq!(expense.kind(), TransactionKind::Expense);
        assert_eq!(expense.magnitude(), dec("45.50"));
        assert_eq!(expense.signed(), dec("-45.50"));

        let income = Amount::from_signed(dec("2000")).unwrap();
        assert!(income.is_income());
        assert_eq!(income.signed(), dec("2000"));
    }

    #[test]
    fn test_zero_is_rejected() {
        assert!(matches!(
            Amount::from_signed(Decimal::ZERO),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(Amount::expense(Decimal::ZERO).is_err());
    }

    #[test]
    fn test_constructor_ignores_sign_of_magnitude() {
        let amount = Amount::expense(dec("-12.25")).unwrap();
        assert_eq!(amount.magnitude(), dec("12.25"));
        assert_eq!(amount.signed(), dec("-12.25"));
    }

    #[test]
    fn test_equal_magnitude_opposite_kind_differ() {
        let income = Amount::income(dec("10")).unwrap();
        let expense = Amount::expense(dec("10")).unwrap();
        assert_ne!(income, expense);
    }

    #[test]
    fn test_from_f64_keeps_short_representation() {
        let amount = Amount::from_f64(-45.5).unwrap();
        assert_eq!(amount.signed(), dec("-45.5"));
        assert!(Amount::from_f64(f64::NAN).is_err());
        assert!(Amount::from_f64(0.0).is_err());
    }

    #[test]
    fn test_magnitude_above_limit_is_rejected() {
        assert!(matches!(
            Amount::income(Decimal::MAX),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(Amount::expense(dec("50000000000000000000000000000")).is_err());
        assert!(Amount::from_f64(1e20).is_err());

        let limit = Amount::income(Decimal::from(MAX_MAGNITUDE)).unwrap();
        assert_eq!(limit.to_f64().unwrap(), 1e12);
        assert!(Amount::income(Decimal::from(MAX_MAGNITUDE) + dec("0.01")).is_err());
    }

    #[test]
    fn test_to_f64_refuses_lossy_values() {
        let precise = Amount::expense(dec("123456789.123456789")).unwrap();
        assert!(matches!(precise.to_f64(), Err(LedgerError::InvalidInput(_))));

        for value in ["0.01", "0.1", "19.99", "-45.50", "1954.5", "-123456.78"] {
            let amount = Amount::from_signed(dec(value)).unwrap();
            let stored = amount.to_f64().unwrap();
            assert_eq!(Amount::from_f64(stored).unwrap(), amount, "{}", value);
        }
    }

    #[test]
    fn test_serializes_as_signed_number() {
        let amount = Amount::expense(dec("3.5")).unwrap();
        let json = serde_json::to_value(amount).unwrap();
        assert_eq!(json, serde_json::json!(-3.5));

        let parsed: Amount = serde_json::from_value(serde_json::json!(12.0)).unwrap();
        assert!(parsed.is_income());
        assert!(serde_json::from_value::<Amount>(serde_json::json!(0.0)).is_err());
    }
}
