//! Schema versioning and migrations.
//!
//! The version lives in the SQLite header (`PRAGMA user_version`). Each
//! entry in `MIGRATIONS` lifts the store by exactly one version and runs in
//! its own immediate transaction together with the version bump, so a
//! failing step leaves both the rows and the version untouched.

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};
use tracing::{debug, info};

use crate::amount::Amount;
use crate::error::{LedgerError, Result};

/// Schema version written by this build.
pub const CURRENT_VERSION: i64 = 3;

/// Owner assigned to expenses that predate user accounts.
pub const LEGACY_USERNAME: &str = "default";

type Step = fn(&rusqlite::Transaction<'_>) -> Result<()>;

/// One schema step, lifting the store from `version - 1` to `version`.
struct Migration {
    version: i64,
    name: &'static str,
    apply: Step,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "expense_table",
        apply: create_expense_table,
    },
    Migration {
        version: 2,
        name: "users_and_owned_transactions",
        apply: attach_users,
    },
    Migration {
        version: 3,
        name: "transaction_date",
        apply: add_transaction_date,
    },
];

/// Read the persisted schema version.
pub fn schema_version(conn: &Connection) -> Result<i64> {
    let version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

/// Bring the store up to `CURRENT_VERSION`.
///
/// Returns the version the store was at before migrating. Calling this on
/// an up-to-date store is a no-op.
///
/// # Errors
///
/// - `LedgerError::UnsupportedSchemaVersion` if the store is newer than this build
/// - `LedgerError::MigrationFailed` if a step cannot preserve existing rows
pub fn migrate(conn: &mut Connection) -> Result<i64> {
    let found = schema_version(conn)?;
    if found > CURRENT_VERSION {
        return Err(LedgerError::UnsupportedSchemaVersion {
            found,
            supported: CURRENT_VERSION,
        });
    }
    if found < 0 {
        return Err(LedgerError::MigrationFailed {
            from: found,
            to: CURRENT_VERSION,
            reason: "negative schema version".to_string(),
        });
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > found) {
        let from = migration.version - 1;
        debug!(from, to = migration.version, name = migration.name, "applying migration");

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        (migration.apply)(&tx).map_err(|err| match err {
            LedgerError::StorageUnavailable(_) | LedgerError::MigrationFailed { .. } => err,
            other => LedgerError::MigrationFailed {
                from,
                to: migration.version,
                reason: other.to_string(),
            },
        })?;
        tx.pragma_update(None, "user_version", migration.version)?;
        tx.commit()?;

        info!(
            from,
            to = migration.version,
            name = migration.name,
            "schema migrated"
        );
    }

    Ok(found)
}

fn malformed(reason: String) -> LedgerError {
    LedgerError::Storage(reason)
}

/// v0 -> v1: the original expense-only table.
fn create_expense_table(tx: &rusqlite::Transaction<'_>) -> Result<()> {
    tx.execute_batch(
        r#"
        CREATE TABLE expenses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount REAL,
            category TEXT,
            description TEXT,
            created_at INTEGER
        );
        "#,
    )?;
    Ok(())
}

/// A v1 expense row that passed validation.
struct LegacyExpense {
    id: i64,
    amount: f64,
    category: String,
    description: String,
    created_at: i64,
}

fn legacy_expense(values: [Value; 5]) -> std::result::Result<LegacyExpense, String> {
    let [id, amount, category, description, created_at] = values;
    let id = match id {
        Value::Integer(id) => id,
        other => return Err(format!("expense has invalid id {:?}", other)),
    };
    let amount = match amount {
        Value::Real(value) => value,
        Value::Integer(value) => value as f64,
        other => return Err(format!("expense {} has non-numeric amount {:?}", id, other)),
    };
    if let Err(err) = Amount::from_f64(amount) {
        return Err(format!("expense {} has unusable amount {}: {}", id, amount, err));
    }
    let category = match category {
        Value::Text(text) if !text.trim().is_empty() => text,
        other => return Err(format!("expense {} has invalid category {:?}", id, other)),
    };
    let description = match description {
        Value::Text(text) if !text.trim().is_empty() => text,
        other => return Err(format!("expense {} has invalid description {:?}", id, other)),
    };
    let created_at = match created_at {
        Value::Integer(value) => value,
        other => return Err(format!("expense {} has invalid timestamp {:?}", id, other)),
    };

    Ok(LegacyExpense {
        id,
        amount,
        category,
        description,
        created_at,
    })
}

/// Copy the AUTOINCREMENT high-water mark so rebuilt tables never reuse an ID.
fn carry_sequence(tx: &rusqlite::Transaction<'_>, from: &str, to: &str) -> Result<()> {
    let seq: Option<i64> = tx
        .query_row(
            "SELECT seq FROM sqlite_sequence WHERE name = ?",
            [from],
            |row| row.get(0),
        )
        .optional()?;
    let Some(seq) = seq else {
        return Ok(());
    };

    let updated = tx.execute(
        "UPDATE sqlite_sequence SET seq = MAX(seq, ?1) WHERE name = ?2",
        (seq, to),
    )?;
    if updated == 0 {
        tx.execute(
            "INSERT INTO sqlite_sequence (name, seq) VALUES (?1, ?2)",
            (to, seq),
        )?;
    }
    Ok(())
}

/// v1 -> v2: introduce users and give every transaction an owner.
fn attach_users(tx: &rusqlite::Transaction<'_>) -> Result<()> {
    tx.execute_batch(
        r#"
        CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL,
            password TEXT NOT NULL
        );

        CREATE TABLE transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            description TEXT NOT NULL,
            created_at INTEGER NOT NULL,

            FOREIGN KEY(user_id) REFERENCES users(id)
        );
        "#,
    )?;

    let mut expenses = Vec::new();
    {
        let mut stmt = tx.prepare(
            "SELECT id, amount, category, description, created_at FROM expenses ORDER BY id",
        )?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let values: [Value; 5] = [
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
            ];
            expenses.push(legacy_expense(values).map_err(malformed)?);
        }
    }

    if !expenses.is_empty() {
        tx.execute(
            "INSERT INTO users (username, email, password) VALUES (?, '', '')",
            [LEGACY_USERNAME],
        )?;
        let owner = tx.last_insert_rowid();

        let mut insert = tx.prepare(
            r#"
            INSERT INTO transactions (id, user_id, amount, category, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )?;
        for expense in &expenses {
            insert.execute((
                expense.id,
                owner,
                expense.amount,
                &expense.category,
                &expense.description,
                expense.created_at,
            ))?;
        }
        debug!(rows = expenses.len(), owner, "attached legacy expenses to default user");
    }

    carry_sequence(tx, "expenses", "transactions")?;
    tx.execute_batch("DROP TABLE expenses;")?;
    Ok(())
}

/// v2 -> v3: add the calendar `date` column, derived from `created_at` for existing rows.
fn add_transaction_date(tx: &rusqlite::Transaction<'_>) -> Result<()> {
    tx.execute_batch(
        r#"
        CREATE TABLE transactions_v3 (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            description TEXT NOT NULL,
            date TEXT NOT NULL,
            created_at INTEGER NOT NULL,

            FOREIGN KEY(user_id) REFERENCES users(id)
        );
        "#,
    )?;

    let copied = {
        let mut select = tx.prepare(
            "SELECT id, user_id, amount, category, description, created_at FROM transactions ORDER BY id",
        )?;
        let mut insert = tx.prepare(
            r#"
            INSERT INTO transactions_v3 (id, user_id, amount, category, description, date, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )?;
        let mut rows = select.query([])?;
        let mut copied = 0usize;
        while let Some(row) = rows.next()? {
            let id: i64 = row.get(0)?;
            let created_at: i64 = row.get(5)?;
            let date = DateTime::<Utc>::from_timestamp_millis(created_at)
                .ok_or_else(|| {
                    malformed(format!(
                        "transaction {} has out-of-range timestamp {}",
                        id, created_at
                    ))
                })?
                .date_naive()
                .format("%Y-%m-%d")
                .to_string();
            insert.execute((
                id,
                row.get::<_, i64>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                date,
                created_at,
            ))?;
            copied += 1;
        }
        copied
    };
    debug!(rows = copied, "backfilled transaction dates");

    carry_sequence(tx, "transactions", "transactions_v3")?;
    tx.execute_batch(
        r#"
        DROP TABLE transactions;
        ALTER TABLE transactions_v3 RENAME TO transactions;
        CREATE INDEX transactions_user_created ON transactions (user_id, created_at);
        "#,
    )?;
    Ok(())
}
