//! # Tally Core
//!
//! Core library for Tally - a personal income and expense ledger.
//!
//! This crate provides the durable record store, its schema migrations, and
//! the aggregation rules every presentation surface relies on, independent
//! of the CLI interface.
//!
//! ## Architecture
//!
//! - **storage**: Record store trait, SQLite backend and schema migrations
//! - **amount**: Tagged income/expense amounts
//! - **aggregate**: Totals, category breakdowns and statistics
//! - **ledger**: The facade external collaborators call

pub mod aggregate;
pub mod amount;
pub mod error;
pub mod ledger;
pub mod storage;

pub use aggregate::{Report, Summary};
pub use amount::{Amount, TransactionKind};
pub use error::{LedgerError, Result};
pub use ledger::Ledger;
pub use storage::{RecordStore, SqliteStore, Transaction, TransactionId, User, UserId};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
