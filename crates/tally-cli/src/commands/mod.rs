//! Command handlers, one module per command family.

pub mod init;
pub mod maintenance;
pub mod misc;
pub mod reports;
pub mod transactions;
pub mod users;
