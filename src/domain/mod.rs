/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, CompletionRecord) and the
/// in-memory collections that hold them, along with the single day-key
/// derivation every lookup goes through.

pub mod habit;
pub mod completion;
pub mod day_key;
pub mod registry;
pub mod ledger;
pub mod calendar;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use completion::*;
pub use day_key::*;
pub use registry::*;
pub use ledger::*;
pub use calendar::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Habit name failed validation; shown inline to the user, nothing changes
    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    /// A caller passed an argument outside its documented range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
