/// Tool for deleting habits
///
/// This module implements the habit_delete MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;
use crate::store::{HabitStore, StoreError};
use super::parse_habit_id;

/// Parameters for deleting a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteHabitParams {
    /// ID of the habit to delete
    pub habit_id: String,
}

/// Response from deleting a habit
#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    pub deleted: bool,
    pub message: String,
}

/// Delete a habit and all of its completions
pub fn delete_habit<S: KeyValueStore>(
    store: &mut HabitStore<S>,
    params: DeleteHabitParams,
) -> Result<DeleteHabitResponse, StoreError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let name = store.habit(&habit_id).map(|h| h.name.clone());
    let deleted = store.delete_habit(&habit_id)?;

    let message = match name {
        Some(name) if deleted => format!("🗑️ Deleted habit '{}' and its completion history", name),
        _ => format!("No habit with ID {} (nothing to delete)", habit_id),
    };

    Ok(DeleteHabitResponse { deleted, message })
}
