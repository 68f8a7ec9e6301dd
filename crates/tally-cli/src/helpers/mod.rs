//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Password prompting and confirmation (`input`)
//! - Amount, date, and format parsing (`parsing`)

mod input;
mod parsing;

// Re-export public API
pub use input::{confirm, prompt_password, prompt_signup_password};
pub use parsing::{parse_amount, parse_date, parse_output_format, OutputFormat};
