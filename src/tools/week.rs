/// Tool for the weekly progress summary
///
/// This module implements the habit_week MCP tool. It reports the same
/// stats that habit_share emails.

use chrono::{Days, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{overall_percentage, WeeklyStat};
use crate::domain::TODAY_OFFSET;
use crate::storage::KeyValueStore;
use crate::store::{HabitStore, StoreError};

/// Parameters for the weekly summary
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct WeekParams {}

/// Response carrying the weekly stats
#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub stats: Vec<WeeklyStat>,
    pub overall_percentage: u8,
    pub message: String,
}

/// Summarize the trailing week for every habit
pub fn weekly_summary<S: KeyValueStore>(
    store: &HabitStore<S>,
    _params: WeekParams,
    today: NaiveDate,
) -> Result<WeekResponse, StoreError> {
    let stats = store.weekly_stats(today)?;
    let overall = overall_percentage(&stats);

    if stats.is_empty() {
        return Ok(WeekResponse {
            stats,
            overall_percentage: overall,
            message: "No habits found. Create your first habit to get started!".to_string(),
        });
    }

    let start = today.checked_sub_days(Days::new(u64::from(TODAY_OFFSET))).unwrap_or(today);
    let header = format!(
        "📊 **Week of {} – {}**",
        start.format("%b %-d"),
        today.format("%b %-d, %Y")
    );

    let rows = stats
        .iter()
        .map(|s| format!("- {}: {}/{} days ({}%)", s.name, s.completed, s.total, s.percentage))
        .collect::<Vec<_>>()
        .join("\n");

    let message = format!("{}\n\n{}\n\nOverall: {}%", header, rows, overall);

    Ok(WeekResponse {
        stats,
        overall_percentage: overall,
        message,
    })
}
