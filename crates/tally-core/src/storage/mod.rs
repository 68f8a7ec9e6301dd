//! Storage layer: record store trait, data types and the SQLite backend.

pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::schema::{CURRENT_VERSION, LEGACY_USERNAME};
pub use sqlite::SqliteStore;
pub use traits::RecordStore;
pub use types::{NewTransaction, NewUser, Transaction, TransactionId, User, UserId};
