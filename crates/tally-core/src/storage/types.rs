//! Core data types for the storage layer.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::amount::Amount;

/// Identifier of a user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

/// Identifier of a transaction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An account holder.
///
/// The password is an opaque string owned by the auth collaborator; it is
/// stored and returned verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// A recorded income or expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned identifier
    pub id: TransactionId,

    /// Owning user; immutable after insert
    pub user_id: UserId,

    pub amount: Amount,

    pub category: String,

    pub description: String,

    /// Calendar day the transaction is attributed to
    pub date: NaiveDate,

    /// Insertion time; canonical sort key
    pub created_at: DateTime<Utc>,
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub user_id: UserId,
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn new(
        user_id: UserId,
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            user_id,
            amount,
            category: category.into(),
            description: description.into(),
            date,
        }
    }
}

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}
