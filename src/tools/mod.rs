/// MCP tools for habit management
///
/// This module contains all the MCP tools that external clients can call to
/// interact with the habit tracker. Each tool takes a parameter struct and
/// returns a response carrying a human-readable message.

pub mod create;
pub mod delete;
pub mod toggle;
pub mod list;
pub mod week;
pub mod calendar;
pub mod settings;
pub mod share;

// Re-export tool functions for easy access
pub use create::*;
pub use delete::*;
pub use toggle::*;
pub use list::*;
pub use week::*;
pub use calendar::*;
pub use settings::*;
pub use share::*;

use crate::domain::{DomainError, HabitId, WEEK_LEN};

/// Parse a habit ID supplied as a tool argument
pub(crate) fn parse_habit_id(raw: &str) -> Result<HabitId, DomainError> {
    if raw.trim().is_empty() {
        return Err(DomainError::InvalidArgument("Habit ID cannot be empty".to_string()));
    }
    HabitId::from_string(raw)
        .map_err(|_| DomainError::InvalidArgument(format!("Invalid habit ID format: '{}'", raw.trim())))
}

/// Render a week of completion flags as a row of marks
pub(crate) fn week_marks(week: &[bool; WEEK_LEN as usize]) -> String {
    week.iter()
        .map(|done| if *done { "✓" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}
