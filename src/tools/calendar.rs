/// Tool for the month calendar
///
/// This module implements the habit_calendar MCP tool. Without a date it
/// draws the month grid; with a date it also reports every habit's
/// completion for that day so it can be toggled with habit_toggle.

use chrono::{Datelike, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{canonical_day, parse_day, DomainError, MonthView};
use crate::storage::KeyValueStore;
use crate::store::{HabitStore, StoreError};

/// Parameters for the calendar view
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct CalendarParams {
    /// Year to show (defaults to the current year)
    pub year: Option<i32>,
    /// Month to show, 1-12 (defaults to the current month)
    pub month: Option<u32>,
    /// Selected day (YYYY-MM-DD); shows that month and each habit's status on the day
    pub date: Option<String>,
}

/// A habit's completion state on the selected day
#[derive(Debug, Serialize)]
pub struct DayStatus {
    pub habit_id: String,
    pub name: String,
    pub completed: bool,
}

/// Response from the calendar tool
#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub selected: Option<String>,
    pub day_status: Vec<DayStatus>,
    pub message: String,
}

/// Render a month, optionally with one day selected
pub fn show_calendar<S: KeyValueStore>(
    store: &HabitStore<S>,
    params: CalendarParams,
    today: NaiveDate,
) -> Result<CalendarResponse, StoreError> {
    let selected = params.date.as_deref().map(parse_day).transpose()?;

    let view = match (selected, params.year, params.month) {
        (Some(day), None, None) => MonthView::new(day.year(), day.month(), today)?,
        (Some(_), _, _) => {
            return Err(DomainError::InvalidArgument(
                "Provide either date or year/month, not both".to_string()
            ).into());
        }
        (None, year, month) => MonthView::new(
            year.unwrap_or_else(|| today.year()),
            month.unwrap_or_else(|| today.month()),
            today,
        )?,
    };

    let mut message = render_grid(store, &view)?;

    let day_status: Vec<DayStatus> = match selected {
        Some(day) => store
            .registry()
            .iter()
            .map(|h| DayStatus {
                habit_id: h.id.to_string(),
                name: h.name.clone(),
                completed: store.is_completed_on(&h.id, day),
            })
            .collect(),
        None => Vec::new(),
    };

    if let Some(day) = selected {
        message.push_str(&format!("\n\n📅 {}\n", day.format("%A, %B %-d, %Y")));
        if day_status.is_empty() {
            message.push_str("No habits yet.");
        }
        for status in &day_status {
            message.push_str(&format!(
                "{} {} ({})\n",
                if status.completed { "✓" } else { "○" },
                status.name,
                status.habit_id
            ));
        }
    }

    Ok(CalendarResponse {
        year: view.year(),
        month: view.month(),
        selected: selected.map(canonical_day),
        day_status,
        message: message.trim_end().to_string(),
    })
}

/// Sunday-first grid; `[dd]` marks today and `•` marks days with any completion
fn render_grid<S: KeyValueStore>(store: &HabitStore<S>, view: &MonthView) -> Result<String, StoreError> {
    let mut out = format!("🗓️ **{}**\n Sun Mon Tue Wed Thu Fri Sat\n", view.title());

    for week in view.weeks() {
        let mut line = String::new();
        for cell in week {
            match cell {
                None => line.push_str("    "),
                Some(day) => {
                    let date = view.date(day)?;
                    let any_done = store.registry().iter().any(|h| store.is_completed_on(&h.id, date));
                    if view.is_today(day) {
                        line.push_str(&format!("[{:>2}]", day));
                    } else if any_done {
                        line.push_str(&format!(" {:>2}•", day));
                    } else {
                        line.push_str(&format!(" {:>2} ", day));
                    }
                }
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    Ok(out)
}
