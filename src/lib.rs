//! Interview Tracker - per-user job interview records on a document store
//!
//! The core is [`services::InterviewManager`]: it lists, filters, creates,
//! edits and deletes interviews of the signed-in user and publishes view
//! state (`interviews`, `interview`, `is_loading`, `selected_filter_result`)
//! that presentation layers subscribe to.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Interview records and typed document values
//! - **services**: The interview service and its container
//! - **infra**: Document stores, session and navigation
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Create an interview
//! cargo run -- --user u1 add --company Acme --stage "phone screen@2024-05-01T10:00:00Z"
//!
//! # List only offers
//! cargo run -- --user u1 list --result Offer
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{Interview, InterviewFields, InterviewResult, Stage, StageDate};
pub use errors::{AppError, AppResult};
pub use services::{InterviewManager, InterviewService, ServiceContainer, Services};
