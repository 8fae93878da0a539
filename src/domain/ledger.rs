/// Completion ledger
///
/// Set of completion records keyed by [`DayKey`]. A key is either present
/// (completed) or absent (not completed); records are never flipped in place,
/// which keeps at most one record per (habit, day).

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{CompletionRecord, DayKey, DomainError, HabitId, WEEK_LEN};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionLedger {
    records: BTreeMap<DayKey, CompletionRecord>,
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from persisted records
    ///
    /// Records stored as not-completed carry no information and are skipped.
    /// Stored keys are re-derived so a stale encoding cannot break lookups.
    pub fn from_records(records: Vec<CompletionRecord>) -> Self {
        let mut ledger = Self::new();
        for record in records {
            if !record.completed {
                tracing::warn!("Skipping persisted completion marked not completed: {}", record.key);
                continue;
            }
            let day = record.day();
            let record = CompletionRecord::new(record.habit_id, day);
            ledger.records.insert(record.key.clone(), record);
        }
        ledger
    }

    /// Check whether a key is present
    pub fn is_completed(&self, key: &DayKey) -> bool {
        self.records.contains_key(key)
    }

    /// Check whether a habit is completed on a calendar day
    pub fn is_completed_on(&self, habit_id: &HabitId, day: NaiveDate) -> bool {
        self.is_completed(&DayKey::derive(habit_id, day))
    }

    /// Flip the completion state of a habit on a calendar day
    ///
    /// Returns the new state: `true` if a record was inserted, `false` if one
    /// was removed.
    pub fn toggle(&mut self, habit_id: &HabitId, day: NaiveDate) -> bool {
        let key = DayKey::derive(habit_id, day);
        if self.records.remove(&key).is_some() {
            false
        } else {
            self.records.insert(key, CompletionRecord::new(habit_id.clone(), day));
            true
        }
    }

    /// Completion flags for the trailing week, oldest (offset 0) to today (offset 6)
    pub fn weekly_completions(&self, habit_id: &HabitId, today: NaiveDate) -> Result<[bool; WEEK_LEN as usize], DomainError> {
        let mut week = [false; WEEK_LEN as usize];
        for (offset, slot) in (0..WEEK_LEN).zip(week.iter_mut()) {
            *slot = self.is_completed(&DayKey::for_offset(habit_id, today, offset)?);
        }
        Ok(week)
    }

    /// Remove every record for a habit, returning what was removed
    pub fn remove_habit(&mut self, habit_id: &HabitId) -> Vec<CompletionRecord> {
        let keys: Vec<DayKey> = self
            .records
            .values()
            .filter(|r| &r.habit_id == habit_id)
            .map(|r| r.key.clone())
            .collect();

        keys.into_iter()
            .filter_map(|key| self.records.remove(&key))
            .collect()
    }

    /// Re-insert previously removed records
    pub(crate) fn restore(&mut self, records: Vec<CompletionRecord>) {
        for record in records {
            self.records.insert(record.key.clone(), record);
        }
    }

    /// Number of records held for a habit
    pub fn count_for(&self, habit_id: &HabitId) -> usize {
        self.records.values().filter(|r| &r.habit_id == habit_id).count()
    }

    /// Snapshot of all records in key order
    pub fn records(&self) -> Vec<CompletionRecord> {
        self.records.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
