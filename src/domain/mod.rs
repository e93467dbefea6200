//! Domain layer - Core business entities and logic
//!
//! This module contains the interview records and the typed document
//! values they are stored as, independent of any particular store.

pub mod interview;
pub mod value;

pub use interview::{Interview, InterviewFields, InterviewResult, Stage, StageDate};
pub use value::{Document, Timestamp, Value};
