//! SQLite storage backend.
//!
//! `SqliteStore` holds only the path of the database file. Every operation
//! opens its own connection, does its work inside at most one SQLite
//! transaction, and drops the connection before returning, on success and
//! on every error path alike.

mod row;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use tracing::debug;

use crate::error::{LedgerError, Result};
use crate::storage::traits::RecordStore;
use crate::storage::types::{NewTransaction, NewUser, Transaction, TransactionId, User, UserId};

use row::{user_from_row, TransactionRow, DATE_FORMAT, TRANSACTION_COLUMNS, USER_COLUMNS};
use schema::CURRENT_VERSION;

/// SQLite-backed record store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open (creating if needed) the store at `path` and migrate it to the
    /// current schema. Safe to call repeatedly on the same path.
    ///
    /// # Errors
    ///
    /// - `LedgerError::StorageUnavailable` if the file cannot be opened or created
    /// - `LedgerError::UnsupportedSchemaVersion` if the file is newer than this build
    /// - `LedgerError::MigrationFailed` if existing rows cannot be migrated
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut conn = Connection::open(&path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let before = schema::migrate(&mut conn)?;
        debug!(path = %path.display(), from = before, to = CURRENT_VERSION, "store opened");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire a connection for a single operation.
    ///
    /// The file must already exist; a store whose file has vanished reports
    /// `StorageUnavailable` instead of silently starting over.
    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    fn require_text(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(LedgerError::InvalidInput(format!("{} cannot be empty", field)));
        }
        Ok(())
    }

    fn query_user(conn: &Connection, filter: &str, value: &dyn rusqlite::ToSql) -> Result<Option<User>> {
        let query = format!(
            "SELECT {} FROM users WHERE {} = ? ORDER BY id LIMIT 1",
            USER_COLUMNS, filter
        );
        let user = conn
            .query_row(&query, [value], user_from_row)
            .optional()?;
        Ok(user)
    }
}

impl RecordStore for SqliteStore {
    fn schema_version(&self) -> Result<i64> {
        let conn = self.connect()?;
        schema::schema_version(&conn)
    }

    fn create_user(&self, user: &NewUser) -> Result<UserId> {
        Self::require_text("Username", &user.username)?;

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM users WHERE username = ?",
                [&user.username],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(LedgerError::DuplicateUsername(user.username.clone()));
        }

        tx.execute(
            "INSERT INTO users (username, email, password) VALUES (?, ?, ?)",
            (&user.username, &user.email, &user.password),
        )?;
        let id = UserId(tx.last_insert_rowid());
        tx.commit()?;

        debug!(user_id = %id, "user created");
        Ok(id)
    }

    fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let conn = self.connect()?;
        Self::query_user(&conn, "id", &id.0)
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.connect()?;
        Self::query_user(&conn, "email", &email)
    }

    fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.connect()?;
        Self::query_user(&conn, "username", &username)
    }

    fn create_transaction(&self, new: &NewTransaction) -> Result<TransactionId> {
        Self::require_text("Category", &new.category)?;
        Self::require_text("Description", &new.description)?;
        let amount = new.amount.to_f64()?;

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        let owner: Option<i64> = tx
            .query_row(
                "SELECT id FROM users WHERE id = ?",
                [new.user_id.0],
                |row| row.get(0),
            )
            .optional()?;
        if owner.is_none() {
            return Err(LedgerError::UnknownUser(new.user_id));
        }

        // created_at never moves backwards, even if the wall clock does.
        let latest: i64 = tx.query_row(
            "SELECT COALESCE(MAX(created_at), 0) FROM transactions",
            [],
            |row| row.get(0),
        )?;
        let created_at = Utc::now().timestamp_millis().max(latest);

        tx.execute(
            r#"
            INSERT INTO transactions (user_id, amount, category, description, date, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            (
                new.user_id.0,
                amount,
                &new.category,
                &new.description,
                new.date.format(DATE_FORMAT).to_string(),
                created_at,
            ),
        )?;
        let id = TransactionId(tx.last_insert_rowid());
        tx.commit()?;

        debug!(transaction_id = %id, user_id = %new.user_id, "transaction created");
        Ok(id)
    }

    fn get_transactions(&self, user_id: UserId) -> Result<Vec<Transaction>> {
        let conn = self.connect()?;

        let query = format!(
            "SELECT {} FROM transactions WHERE user_id = ? ORDER BY created_at DESC, id DESC",
            TRANSACTION_COLUMNS
        );
        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map([user_id.0], TransactionRow::from_row)?;

        let mut transactions = Vec::new();
        for row in rows {
            transactions.push(row?.try_into()?);
        }
        Ok(transactions)
    }

    fn get_transaction(&self, id: TransactionId) -> Result<Option<Transaction>> {
        let conn = self.connect()?;

        let query = format!(
            "SELECT {} FROM transactions WHERE id = ?",
            TRANSACTION_COLUMNS
        );
        let row = conn
            .query_row(&query, [id.0], TransactionRow::from_row)
            .optional()?;
        row.map(Transaction::try_from).transpose()
    }

    fn update_transaction(&self, tx: &Transaction) -> Result<usize> {
        Self::require_text("Category", &tx.category)?;
        Self::require_text("Description", &tx.description)?;
        let amount = tx.amount.to_f64()?;

        let conn = self.connect()?;
        let affected = conn.execute(
            r#"
            UPDATE transactions
            SET amount = ?, category = ?, description = ?, date = ?
            WHERE id = ? AND user_id = ?
            "#,
            (
                amount,
                &tx.category,
                &tx.description,
                tx.date.format(DATE_FORMAT).to_string(),
                tx.id.0,
                tx.user_id.0,
            ),
        )?;

        debug!(transaction_id = %tx.id, affected, "transaction updated");
        Ok(affected)
    }

    fn delete_transaction(&self, id: TransactionId) -> Result<()> {
        let conn = self.connect()?;
        let affected = conn.execute("DELETE FROM transactions WHERE id = ?", [id.0])?;
        debug!(transaction_id = %id, affected, "transaction deleted");
        Ok(())
    }

    fn count_transactions(&self, user_id: UserId) -> Result<i64> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE user_id = ?",
            [user_id.0],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn check_integrity(&self) -> Result<()> {
        let conn = self.connect()?;

        let version = schema::schema_version(&conn)?;
        if version != CURRENT_VERSION {
            return Err(LedgerError::Integrity(format!(
                "Schema version is v{}, expected v{}",
                version, CURRENT_VERSION
            )));
        }

        let status: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if status != "ok" {
            return Err(LedgerError::Integrity(status));
        }

        let mut stmt = conn.prepare("PRAGMA foreign_key_check")?;
        let mut rows = stmt.query([])?;
        if rows.next()?.is_some() {
            return Err(LedgerError::Integrity(
                "Foreign key integrity check failed".to_string(),
            ));
        }

        let zero_amounts: i64 = conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE amount = 0",
            [],
            |row| row.get(0),
        )?;
        if zero_amounts > 0 {
            return Err(LedgerError::Integrity(format!(
                "{} transaction(s) have a zero amount",
                zero_amounts
            )));
        }

        Ok(())
    }
}
