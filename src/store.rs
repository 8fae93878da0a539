/// Habit completion store
///
/// Owns the habit registry and the completion ledger for one session and
/// writes both through to a [`KeyValueStore`] after every mutation. When the
/// write fails the in-memory change is undone, so memory never runs ahead of
/// what was last persisted.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::analytics::{self, WeeklyStat};
use crate::domain::{
    CompletionLedger, CompletionRecord, DayKey, DomainError, Habit, HabitId, HabitRegistry,
    WEEK_LEN, date_for_offset,
};
use crate::storage::{KeyValueStore, StorageError, COMPLETIONS_KEY, HABITS_KEY};

/// Errors returned by store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    /// The change could not be written; nothing was modified
    #[error("Failed to persist changes: {0}")]
    Persistence(#[from] StorageError),
}

pub struct HabitStore<S> {
    registry: HabitRegistry,
    ledger: CompletionLedger,
    backend: S,
}

impl<S: KeyValueStore> HabitStore<S> {
    /// Load habits and completions from the backend
    ///
    /// Missing keys are treated as empty collections.
    pub fn open(backend: S) -> Result<Self, StoreError> {
        let habits: Vec<Habit> = load_json(&backend, HABITS_KEY)?;
        let completions: Vec<CompletionRecord> = load_json(&backend, COMPLETIONS_KEY)?;

        let registry = HabitRegistry::from_habits(habits);
        let ledger = CompletionLedger::from_records(completions);

        tracing::info!(
            "Loaded {} habit(s) and {} completion(s)",
            registry.len(),
            ledger.len()
        );

        Ok(Self { registry, ledger, backend })
    }

    /// Validate and append a new habit
    pub fn add_habit(&mut self, name: &str) -> Result<Habit, StoreError> {
        let habit = Habit::new(name)?;
        self.registry.push(habit.clone());

        if let Err(e) = self.persist() {
            self.registry.pop();
            return Err(e.into());
        }

        tracing::debug!("Created habit: {} ({})", habit.name, habit.id);
        Ok(habit)
    }

    /// Delete a habit together with all of its completions
    ///
    /// Deleting an unknown id is a no-op. Returns whether a habit was removed.
    pub fn delete_habit(&mut self, habit_id: &HabitId) -> Result<bool, StoreError> {
        let Some((index, habit)) = self.registry.remove(habit_id) else {
            return Ok(false);
        };
        let removed = self.ledger.remove_habit(habit_id);

        if let Err(e) = self.persist() {
            self.registry.restore(index, habit);
            self.ledger.restore(removed);
            return Err(e.into());
        }

        tracing::debug!(
            "Deleted habit: {} ({}) and {} completion(s)",
            habit.name,
            habit_id,
            removed.len()
        );
        Ok(true)
    }

    /// Snapshot of all habits in insertion order
    pub fn list_habits(&self) -> Vec<Habit> {
        self.registry.list()
    }

    pub fn habit(&self, habit_id: &HabitId) -> Option<&Habit> {
        self.registry.get(habit_id)
    }

    pub fn is_completed(&self, key: &DayKey) -> bool {
        self.ledger.is_completed(key)
    }

    pub fn is_completed_on(&self, habit_id: &HabitId, day: NaiveDate) -> bool {
        self.ledger.is_completed_on(habit_id, day)
    }

    /// Toggle a habit at a trailing-week offset (6 = today)
    pub fn toggle(&mut self, habit_id: &HabitId, today: NaiveDate, offset: u8) -> Result<bool, StoreError> {
        let day = date_for_offset(today, offset)?;
        self.toggle_on_date(habit_id, day)
    }

    /// Toggle a habit on an explicit calendar day, returning the new state
    pub fn toggle_on_date(&mut self, habit_id: &HabitId, day: NaiveDate) -> Result<bool, StoreError> {
        self.require_habit(habit_id)?;

        let completed = self.ledger.toggle(habit_id, day);

        if let Err(e) = self.persist() {
            self.ledger.toggle(habit_id, day);
            return Err(e.into());
        }

        tracing::debug!("Toggled {} on {}: completed = {}", habit_id, day, completed);
        Ok(completed)
    }

    /// Completion flags for the trailing week, oldest first
    pub fn weekly_completions(&self, habit_id: &HabitId, today: NaiveDate) -> Result<[bool; WEEK_LEN as usize], StoreError> {
        Ok(self.ledger.weekly_completions(habit_id, today)?)
    }

    /// Weekly stat for a single habit
    pub fn aggregate(&self, habit_id: &HabitId, today: NaiveDate) -> Result<WeeklyStat, StoreError> {
        let habit = self.require_habit(habit_id)?;
        Ok(analytics::aggregate(habit, &self.ledger, today)?)
    }

    /// Weekly stats for every habit in insertion order
    pub fn weekly_stats(&self, today: NaiveDate) -> Result<Vec<WeeklyStat>, StoreError> {
        Ok(analytics::weekly_stats(&self.registry, &self.ledger, today)?)
    }

    /// Remove every habit and completion, in memory and in the backend
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.backend.remove_many(&[HABITS_KEY, COMPLETIONS_KEY])?;
        self.registry.clear();
        self.ledger.clear();

        tracing::info!("Cleared all habit data");
        Ok(())
    }

    pub fn registry(&self) -> &HabitRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &CompletionLedger {
        &self.ledger
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn require_habit(&self, habit_id: &HabitId) -> Result<&Habit, StoreError> {
        self.registry.get(habit_id).ok_or_else(|| StoreError::HabitNotFound {
            habit_id: habit_id.to_string(),
        })
    }

    fn persist(&self) -> Result<(), StorageError> {
        let habits = serde_json::to_string(self.registry.as_slice())?;
        let completions = serde_json::to_string(&self.ledger.records())?;

        self.backend
            .put_many(&[(HABITS_KEY, habits), (COMPLETIONS_KEY, completions)])
            .inspect_err(|e| tracing::error!("Failed to persist habit data: {}", e))
    }
}

fn load_json<S: KeyValueStore, T: DeserializeOwned + Default>(backend: &S, key: &str) -> Result<T, StorageError> {
    match backend.get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(T::default()),
    }
}
