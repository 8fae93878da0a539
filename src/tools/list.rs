/// Tool for listing all habits
///
/// This module implements the habit_list MCP tool: every habit in creation
/// order with its seven-day grid.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::WeeklyStat;
use crate::domain::{trailing_week, WEEK_LEN};
use crate::storage::KeyValueStore;
use crate::store::{HabitStore, StoreError};
use super::week_marks;

/// Parameters for listing habits
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListHabitsParams {}

/// Information about a habit in the list
#[derive(Debug, Serialize)]
pub struct HabitSummary {
    pub habit_id: String,
    pub name: String,
    pub created_at: String,
    /// Completion flags, oldest day first
    pub week: [bool; WEEK_LEN as usize],
    pub stat: WeeklyStat,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitSummary>,
    pub message: String,
}

/// List habits with their trailing-week grid
pub fn list_habits<S: KeyValueStore>(
    store: &HabitStore<S>,
    _params: ListHabitsParams,
    today: NaiveDate,
) -> Result<ListHabitsResponse, StoreError> {
    let mut habits = Vec::with_capacity(store.registry().len());
    for habit in store.registry().iter() {
        let week = store.weekly_completions(&habit.id, today)?;
        habits.push(HabitSummary {
            habit_id: habit.id.to_string(),
            name: habit.name.clone(),
            created_at: habit.created_at.to_rfc3339(),
            week,
            stat: store.aggregate(&habit.id, today)?,
        });
    }

    if habits.is_empty() {
        return Ok(ListHabitsResponse {
            habits,
            message: "🌱 No habits yet. Create your first habit to get started!".to_string(),
        });
    }

    let labels = trailing_week(today)?
        .iter()
        .map(|d| d.format("%a").to_string().chars().next().unwrap_or(' ').to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let detailed_list = habits
        .iter()
        .map(|h| {
            format!(
                "🎯 **{}**\n   {}\n   {}   {}/{} ({}%)\n   ID: {}",
                h.name,
                labels,
                week_marks(&h.week),
                h.stat.completed,
                h.stat.total,
                h.stat.percentage,
                h.habit_id
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let message = format!("📋 **Habits** ({})\n\n{}", habits.len(), detailed_list);

    Ok(ListHabitsResponse { habits, message })
}
