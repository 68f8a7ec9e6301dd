//! Ledger facade.
//!
//! `Ledger` is the surface external collaborators (the CLI, a UI, an API
//! layer) talk to. It opens the store through the schema manager, forwards
//! record operations, and recomputes every aggregate from a fresh fetch.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::aggregate::{self, Report, Summary};
use crate::amount::{Amount, TransactionKind};
use crate::error::Result;
use crate::storage::{
    NewTransaction, NewUser, RecordStore, SqliteStore, Transaction, TransactionId, User, UserId,
};

/// Entry point for reading and writing a ledger.
#[derive(Debug, Clone)]
pub struct Ledger<S = SqliteStore> {
    store: S,
}

impl Ledger<SqliteStore> {
    /// Open the ledger at `path`, creating and migrating it as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_store(SqliteStore::open(path)?))
    }
}

impl<S: RecordStore> Ledger<S> {
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn schema_version(&self) -> Result<i64> {
        self.store.schema_version()
    }

    pub fn check_integrity(&self) -> Result<()> {
        self.store.check_integrity()
    }

    // --- Users ---

    pub fn create_user(&self, username: &str, email: &str, password: &str) -> Result<UserId> {
        self.store
            .create_user(&NewUser::new(username, email, password))
    }

    pub fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.store.get_user(id)
    }

    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.store.find_user_by_email(email)
    }

    pub fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.store.find_user_by_username(username)
    }

    // --- Transactions ---

    pub fn create_transaction(
        &self,
        user_id: UserId,
        amount: Amount,
        category: &str,
        description: &str,
        date: NaiveDate,
    ) -> Result<TransactionId> {
        self.store.create_transaction(&NewTransaction::new(
            user_id,
            amount,
            category,
            description,
            date,
        ))
    }

    pub fn get_transactions(&self, user_id: UserId) -> Result<Vec<Transaction>> {
        self.store.get_transactions(user_id)
    }

    pub fn get_transaction(&self, id: TransactionId) -> Result<Option<Transaction>> {
        self.store.get_transaction(id)
    }

    pub fn update_transaction(&self, tx: &Transaction) -> Result<usize> {
        self.store.update_transaction(tx)
    }

    pub fn delete_transaction(&self, id: TransactionId) -> Result<()> {
        self.store.delete_transaction(id)
    }

    pub fn count_transactions(&self, user_id: UserId) -> Result<i64> {
        self.store.count_transactions(user_id)
    }

    // --- Aggregates ---

    pub fn total_balance(&self, user_id: UserId) -> Result<Decimal> {
        Ok(aggregate::total_balance(&self.get_transactions(user_id)?))
    }

    pub fn total_income(&self, user_id: UserId) -> Result<Decimal> {
        Ok(aggregate::total_income(&self.get_transactions(user_id)?))
    }

    pub fn total_expense(&self, user_id: UserId) -> Result<Decimal> {
        Ok(aggregate::total_expense(&self.get_transactions(user_id)?))
    }

    pub fn category_breakdown(
        &self,
        user_id: UserId,
        kind: TransactionKind,
    ) -> Result<BTreeMap<String, Decimal>> {
        Ok(aggregate::category_breakdown(
            &self.get_transactions(user_id)?,
            kind,
        ))
    }

    pub fn highest(&self, user_id: UserId, kind: TransactionKind) -> Result<Decimal> {
        Ok(aggregate::highest(&self.get_transactions(user_id)?, kind))
    }

    pub fn average(&self, user_id: UserId, kind: TransactionKind) -> Result<Decimal> {
        Ok(aggregate::average(&self.get_transactions(user_id)?, kind))
    }

    pub fn transaction_count(&self, user_id: UserId) -> Result<usize> {
        Ok(aggregate::transaction_count(&self.get_transactions(user_id)?))
    }

    /// Balance, income, expense and count from a single fetch.
    pub fn summary(&self, user_id: UserId) -> Result<Summary> {
        Ok(Summary::from_transactions(&self.get_transactions(user_id)?))
    }

    /// Full statistics from a single fetch.
    pub fn report(&self, user_id: UserId) -> Result<Report> {
        Ok(Report::from_transactions(&self.get_transactions(user_id)?))
    }
}
