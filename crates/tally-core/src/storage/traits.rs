//! Record store trait definition.
//!
//! The `RecordStore` trait is the seam between the ledger facade and the
//! backend that owns the on-disk representation. `SqliteStore` is the only
//! implementation today.

use super::types::{NewTransaction, NewUser, Transaction, TransactionId, User, UserId};
use crate::error::Result;

/// CRUD operations over users and transactions.
///
/// All implementations must ensure:
/// - Every call is self-contained; no handle is held between calls
/// - Mutations are durable once the call returns `Ok`
/// - No transaction ever references a missing user
pub trait RecordStore: Send + Sync {
    /// Persisted schema version.
    fn schema_version(&self) -> Result<i64>;

    // --- User operations ---

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::DuplicateUsername` if the username is taken, or
    /// `LedgerError::InvalidInput` if it is blank.
    fn create_user(&self, user: &NewUser) -> Result<UserId>;

    /// Get a user by ID.
    fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// First user with this email, in insertion order.
    ///
    /// Email is not unique, so later accounts sharing an address are never
    /// returned here.
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    // --- Transaction operations ---

    /// Insert a transaction, assigning its ID and creation time.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::UnknownUser` if the owner does not exist, or
    /// `LedgerError::InvalidInput` if category or description is blank.
    fn create_transaction(&self, tx: &NewTransaction) -> Result<TransactionId>;

    /// All transactions for a user, newest insertion first (ties by ID, descending).
    fn get_transactions(&self, user_id: UserId) -> Result<Vec<Transaction>>;

    /// Get a transaction by ID.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(tx))` if found, `Ok(None)` if not found.
    fn get_transaction(&self, id: TransactionId) -> Result<Option<Transaction>>;

    /// Update amount, category, description and date of an existing transaction.
    ///
    /// The row is matched on both `id` and `user_id`; `created_at` is never
    /// changed.
    ///
    /// # Returns
    ///
    /// Returns the number of rows affected (0 or 1). A missing row is not an
    /// error; callers must check the count.
    fn update_transaction(&self, tx: &Transaction) -> Result<usize>;

    /// Delete a transaction. Deleting a missing ID is a no-op.
    fn delete_transaction(&self, id: TransactionId) -> Result<()>;

    fn count_transactions(&self, user_id: UserId) -> Result<i64>;

    // --- Maintenance operations ---

    /// Check store integrity.
    ///
    /// Verifies:
    /// - SQLite page integrity
    /// - Foreign key relationships
    /// - Schema version is current
    fn check_integrity(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_dyn(_store: &dyn RecordStore) {}
    }
}
