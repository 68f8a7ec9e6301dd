//! Application-level utilities for the Tally CLI.
//!
//! This module provides:
//! - Application context for unified CLI + config handling
//! - Path resolution for config and ledger files
//! - Acting-user resolution

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
