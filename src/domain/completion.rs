/// CompletionRecord entity for tracking habit completions
///
/// A record exists only while its habit counts as done on that day; removing
/// the record is how a completion is undone.

use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use crate::domain::{DayKey, HabitId};

/// A record of completing a habit on a specific calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    /// Which habit this completion is for
    pub habit_id: HabitId,
    /// Uniqueness key for the (habit, day) pair
    pub key: DayKey,
    /// Local midnight of the completed day
    pub date: NaiveDateTime,
    /// Always true for stored records
    pub completed: bool,
}

impl CompletionRecord {
    /// Create a completion for a habit on a calendar day
    pub fn new(habit_id: HabitId, day: NaiveDate) -> Self {
        let key = DayKey::derive(&habit_id, day);
        Self {
            habit_id,
            key,
            date: day.and_time(NaiveTime::MIN),
            completed: true,
        }
    }

    /// The calendar day this completion covers
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}
