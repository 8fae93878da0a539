/// Tool for creating new habits
///
/// This module implements the habit_create MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;
use crate::store::{HabitStore, StoreError};

/// Parameters for creating a new habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateHabitParams {
    /// Name of the habit (1-50 characters)
    pub name: String,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub habit_id: String,
    pub name: String,
    pub message: String,
}

/// Create a new habit in the store
pub fn create_habit<S: KeyValueStore>(
    store: &mut HabitStore<S>,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, StoreError> {
    let habit = store.add_habit(&params.name)?;

    Ok(CreateHabitResponse {
        habit_id: habit.id.to_string(),
        message: format!(
            "✅ Created habit '{}'! Toggle today's box once it's done.\nHabit ID: {}",
            habit.name, habit.id
        ),
        name: habit.name,
    })
}
