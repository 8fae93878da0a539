/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents a user's habit
/// they want to track, along with its name validation rules.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{HabitId, DomainError};

/// Longest accepted habit name, counted in UTF-16 code units
pub const MAX_HABIT_NAME_LEN: usize = 50;

/// A habit represents something the user wants to do regularly
///
/// Habits are created once and never edited; the only other lifecycle
/// event is deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Read for 30min")
    pub name: String,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// The name is trimmed before it is validated and stored.
    pub fn new(name: &str) -> Result<Self, DomainError> {
        let name = Self::validate_name(name)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            created_at: Utc::now(),
        })
    }

    /// Create a habit from existing data (used when loading persisted records)
    pub fn from_existing(id: HabitId, name: String, created_at: DateTime<Utc>) -> Self {
        Self { id, name, created_at }
    }

    /// Validate a habit name and return its trimmed form
    pub fn validate_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if trimmed.encode_utf16().count() > MAX_HABIT_NAME_LEN {
            return Err(DomainError::InvalidHabitName(format!(
                "Habit name must be at most {} characters",
                MAX_HABIT_NAME_LEN
            )));
        }

        Ok(trimmed.to_string())
    }
}
