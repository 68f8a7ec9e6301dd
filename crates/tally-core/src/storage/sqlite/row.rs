//! Row types for database queries.

use chrono::{DateTime, NaiveDate, Utc};

use crate::amount::Amount;
use crate::error::{LedgerError, Result};
use crate::storage::types::{Transaction, TransactionId, User, UserId};

/// Column list matching `TransactionRow::from_row`.
pub const TRANSACTION_COLUMNS: &str =
    "id, user_id, amount, category, description, date, created_at";

pub const USER_COLUMNS: &str = "id, username, email, password";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw row data from the transactions table, before parsing into domain types.
#[derive(Debug)]
pub struct TransactionRow {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: String,
    pub created_at: i64,
}

impl TransactionRow {
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            amount: row.get(2)?,
            category: row.get(3)?,
            description: row.get(4)?,
            date: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = LedgerError;

    fn try_from(row: TransactionRow) -> Result<Self> {
        let amount = Amount::from_f64(row.amount).map_err(|e| {
            LedgerError::Storage(format!("Invalid amount in transaction {}: {}", row.id, e))
        })?;
        let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT)
            .map_err(|e| LedgerError::Storage(format!("Invalid date {:?}: {}", row.date, e)))?;
        let created_at = DateTime::<Utc>::from_timestamp_millis(row.created_at).ok_or_else(|| {
            LedgerError::Storage(format!("Invalid timestamp: {}", row.created_at))
        })?;

        Ok(Transaction {
            id: TransactionId(row.id),
            user_id: UserId(row.user_id),
            amount,
            category: row.category,
            description: row.description,
            date,
            created_at,
        })
    }
}

pub fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: UserId(row.get(0)?),
        username: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn row() -> TransactionRow {
        TransactionRow {
            id: 3,
            user_id: 1,
            amount: -45.5,
            category: "Food & Dining".to_string(),
            description: "Dinner".to_string(),
            date: "2024-01-10".to_string(),
            created_at: 1_704_931_200_000,
        }
    }

    #[test]
    fn test_row_parses_into_transaction() {
        let tx: Transaction = row().try_into().unwrap();
        assert_eq!(tx.id, TransactionId(3));
        assert_eq!(tx.amount.signed(), Decimal::new(-455, 1));
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(tx.created_at.timestamp_millis(), 1_704_931_200_000);
    }

    #[test]
    fn test_corrupt_rows_are_storage_errors() {
        let mut bad_date = row();
        bad_date.date = "10/01/2024".to_string();
        assert!(matches!(
            Transaction::try_from(bad_date),
            Err(LedgerError::Storage(_))
        ));

        let mut zero = row();
        zero.amount = 0.0;
        assert!(matches!(
            Transaction::try_from(zero),
            Err(LedgerError::Storage(_))
        ));
    }
}
