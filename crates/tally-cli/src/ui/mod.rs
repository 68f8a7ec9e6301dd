//! UI primitives for the Tally CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode) and
//!   output mode routing (json, plain, pretty)
//! - **Theme**: Badge tokens and color styles
//! - **Render**: Tables, headers, receipts, hints
//! - **Format**: Money and text utilities
//!
//! # Usage
//!
//! ```ignore
//! let ui = ctx.ui_context(args.json, None);
//! if ui.mode.is_json() {
//!     return print_json(&transactions);
//! }
//! print(&ui, &header(&ui, "list", Some(&username)));
//! print(&ui, &table(&ui, &columns, &rows));
//! ```

mod context;
pub mod format;
pub mod render;
pub mod theme;

pub use context::{OutputMode, UiContext};
pub use theme::Badge;

pub use render::{
    badge, blank_line, divider, header, hint, kv, print, print_error, print_json, receipt, table,
    Column,
};
