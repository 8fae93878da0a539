/// Weekly aggregation of habit completions
///
/// Both the on-screen weekly view and the shared email summary are built
/// from [`weekly_stats`], so the numbers a friend receives always match what
/// the user sees.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{CompletionLedger, DomainError, Habit, HabitRegistry, WEEK_LEN};

/// Completion summary for one habit over the trailing week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WeeklyStat {
    pub name: String,
    /// Days completed within the window (0-7)
    pub completed: u8,
    /// Window length, always 7
    pub total: u8,
    /// `completed / total` as a whole percentage, rounded to nearest
    pub percentage: u8,
}

impl WeeklyStat {
    /// Summarize a week of completion flags for a named habit
    pub fn from_week(name: &str, week: &[bool; WEEK_LEN as usize]) -> Self {
        let completed = week.iter().filter(|done| **done).count() as u8;
        Self {
            name: name.to_string(),
            completed,
            total: WEEK_LEN,
            percentage: completion_percentage(completed, WEEK_LEN),
        }
    }
}

/// Whole-number percentage, rounding halves away from zero
pub fn completion_percentage(completed: u8, total: u8) -> u8 {
    if total == 0 {
        return 0;
    }
    (100.0 * f64::from(completed) / f64::from(total)).round() as u8
}

/// Aggregate one habit's trailing week
pub fn aggregate(habit: &Habit, ledger: &CompletionLedger, today: NaiveDate) -> Result<WeeklyStat, DomainError> {
    let week = ledger.weekly_completions(&habit.id, today)?;
    Ok(WeeklyStat::from_week(&habit.name, &week))
}

/// Aggregate every habit in registry order
pub fn weekly_stats(
    registry: &HabitRegistry,
    ledger: &CompletionLedger,
    today: NaiveDate,
) -> Result<Vec<WeeklyStat>, DomainError> {
    registry
        .iter()
        .map(|habit| aggregate(habit, ledger, today))
        .collect()
}

/// Mean percentage across habits, 0 when there are none
pub fn overall_percentage(stats: &[WeeklyStat]) -> u8 {
    let total: u32 = stats.iter().map(|s| u32::from(s.total)).sum();
    let completed: u32 = stats.iter().map(|s| u32::from(s.completed)).sum();
    if total == 0 {
        return 0;
    }
    (100.0 * f64::from(completed) / f64::from(total)).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_percentage_table() {
        let expected = [0, 14, 29, 43, 57, 71, 86, 100];
        for (completed, pct) in expected.iter().enumerate() {
            assert_eq!(completion_percentage(completed as u8, 7), *pct, "completed = {}", completed);
        }
    }

    #[test]
    fn test_percentage_rounds_half_away_from_zero() {
        assert_eq!(completion_percentage(1, 8), 13); // 12.5
        assert_eq!(completion_percentage(0, 0), 0);
    }

    #[test]
    fn test_aggregate_single_completion() {
        let habit = Habit::new("Read").unwrap();
        let mut ledger = CompletionLedger::new();
        let today = ymd(2024, 6, 10);
        ledger.toggle(&habit.id, today);

        let stat = aggregate(&habit, &ledger, today).unwrap();
        assert_eq!(
            stat,
            WeeklyStat { name: "Read".to_string(), completed: 1, total: 7, percentage: 14 }
        );
    }

    #[test]
    fn test_weekly_stats_follow_registry_order() {
        let mut registry = HabitRegistry::new();
        let read = Habit::new("Read").unwrap();
        let run = Habit::new("Run").unwrap();
        registry.push(read.clone());
        registry.push(run.clone());

        let today = ymd(2024, 3, 1);
        let mut ledger = CompletionLedger::new();
        for day in crate::domain::trailing_week(today).unwrap() {
            ledger.toggle(&run.id, day);
        }

        let stats = weekly_stats(&registry, &ledger, today).unwrap();
        assert_eq!(stats[0].name, "Read");
        assert_eq!(stats[0].percentage, 0);
        assert_eq!(stats[1].completed, 7);
        assert_eq!(stats[1].percentage, 100);
        assert_eq!(overall_percentage(&stats), 50);
    }

    #[test]
    fn test_stat_serializes_with_wire_field_names() {
        let stat = WeeklyStat::from_week("Read", &[false, false, false, false, false, false, true]);
        let value = serde_json::to_value(&stat).unwrap();
        assert_eq!(value, serde_json::json!({"name": "Read", "completed": 1, "total": 7, "percentage": 14}));
    }
}
