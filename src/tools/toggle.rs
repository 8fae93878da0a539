/// Tool for toggling habit completions
///
/// This module implements the habit_toggle MCP tool. A completion can be
/// addressed either by its position in the trailing week or by an explicit
/// calendar date.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{canonical_day, date_for_offset, parse_day, DomainError, TODAY_OFFSET};
use crate::storage::KeyValueStore;
use crate::store::{HabitStore, StoreError};
use super::parse_habit_id;

/// Parameters for toggling a completion
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ToggleParams {
    /// ID of the habit to toggle
    pub habit_id: String,
    /// Position in the trailing week: 0 = six days ago, 6 = today (default 6)
    pub day_index: Option<u8>,
    /// Explicit calendar date (YYYY-MM-DD); cannot be combined with day_index
    pub date: Option<String>,
}

/// Response from toggling a completion
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub habit_id: String,
    pub date: String,
    pub completed: bool,
    pub message: String,
}

/// Toggle a habit's completion for one day
pub fn toggle_habit<S: KeyValueStore>(
    store: &mut HabitStore<S>,
    params: ToggleParams,
    today: NaiveDate,
) -> Result<ToggleResponse, StoreError> {
    let habit_id = parse_habit_id(&params.habit_id)?;

    let day = match (params.date, params.day_index) {
        (Some(_), Some(_)) => {
            return Err(DomainError::InvalidArgument(
                "Provide either day_index or date, not both".to_string()
            ).into());
        }
        (Some(date), None) => parse_day(&date)?,
        (None, index) => date_for_offset(today, index.unwrap_or(TODAY_OFFSET))?,
    };

    let completed = store.toggle_on_date(&habit_id, day)?;
    let name = store.habit(&habit_id).map(|h| h.name.as_str()).unwrap_or("habit");

    let message = if completed {
        format!("🔥 Marked '{}' done for {}", name, day.format("%A, %B %-d, %Y"))
    } else {
        format!("↩️ Cleared '{}' for {}", name, day.format("%A, %B %-d, %Y"))
    };

    Ok(ToggleResponse {
        habit_id: habit_id.to_string(),
        date: canonical_day(day),
        completed,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn params(habit_id: &str, day_index: Option<u8>, date: Option<&str>) -> ToggleParams {
        ToggleParams {
            habit_id: habit_id.to_string(),
            day_index,
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_toggle_defaults_to_today() {
        let mut store = HabitStore::open(MemoryStore::new()).unwrap();
        let habit = store.add_habit("Read").unwrap();
        let today = ymd(2024, 6, 10);

        let response = toggle_habit(&mut store, params(&habit.id.to_string(), None, None), today).unwrap();
        assert!(response.completed);
        assert_eq!(response.date, "2024-06-10");
        assert!(response.message.contains("Monday, June 10, 2024"));

        let response = toggle_habit(&mut store, params(&habit.id.to_string(), Some(6), None), today).unwrap();
        assert!(!response.completed);
    }

    #[test]
    fn test_toggle_explicit_date_matches_offset() {
        let mut store = HabitStore::open(MemoryStore::new()).unwrap();
        let habit = store.add_habit("Read").unwrap();
        let today = ymd(2024, 3, 1);

        toggle_habit(&mut store, params(&habit.id.to_string(), None, Some("2024-02-24")), today).unwrap();
        assert_eq!(
            store.weekly_completions(&habit.id, today).unwrap(),
            [true, false, false, false, false, false, false]
        );
    }

    #[test]
    fn test_toggle_rejects_bad_input() {
        let mut store = HabitStore::open(MemoryStore::new()).unwrap();
        let habit = store.add_habit("Read").unwrap();
        let id = habit.id.to_string();
        let today = ymd(2024, 6, 10);

        assert!(toggle_habit(&mut store, params(&id, Some(7), None), today).is_err());
        assert!(toggle_habit(&mut store, params(&id, Some(1), Some("2024-06-01")), today).is_err());
        assert!(toggle_habit(&mut store, params(&id, None, Some("2024-13-01")), today).is_err());
        assert!(store.ledger().is_empty());
    }
}
