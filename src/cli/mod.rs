//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `list` - List interviews, optionally filtered by result
//! - `add` - Create an interview
//! - `show` - Print one interview
//! - `update` - Merge new field values into an interview
//! - `remove` - Delete an interview

pub mod args;

pub use args::{Cli, Commands};
