/// Habit registry
///
/// Ordered collection of habits. Insertion order is display order.

use crate::domain::{Habit, HabitId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitRegistry {
    habits: Vec<Habit>,
}

impl HabitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from persisted habits, keeping the first of any duplicated id
    pub fn from_habits(habits: Vec<Habit>) -> Self {
        let mut registry = Self::new();
        for habit in habits {
            if registry.contains(&habit.id) {
                tracing::warn!("Skipping duplicate habit id in persisted data: {}", habit.id);
                continue;
            }
            registry.habits.push(habit);
        }
        registry
    }

    /// Append a habit at the end of the display order
    pub fn push(&mut self, habit: Habit) {
        self.habits.push(habit);
    }

    /// Remove a habit, returning its position and record if it was present
    pub fn remove(&mut self, habit_id: &HabitId) -> Option<(usize, Habit)> {
        let index = self.habits.iter().position(|h| &h.id == habit_id)?;
        Some((index, self.habits.remove(index)))
    }

    /// Put a removed habit back at its former position
    pub(crate) fn restore(&mut self, index: usize, habit: Habit) {
        let index = index.min(self.habits.len());
        self.habits.insert(index, habit);
    }

    /// Drop the most recently pushed habit
    pub(crate) fn pop(&mut self) -> Option<Habit> {
        self.habits.pop()
    }

    pub fn get(&self, habit_id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| &h.id == habit_id)
    }

    pub fn contains(&self, habit_id: &HabitId) -> bool {
        self.get(habit_id).is_some()
    }

    /// Snapshot of all habits in insertion order
    pub fn list(&self) -> Vec<Habit> {
        self.habits.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Habit> {
        self.habits.iter()
    }

    pub fn as_slice(&self) -> &[Habit] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn clear(&mut self) {
        self.habits.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut registry = HabitRegistry::new();
        for name in ["Read", "Run", "Write"] {
            registry.push(Habit::new(name).unwrap());
        }
        let names: Vec<_> = registry.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Read", "Run", "Write"]);
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let mut registry = HabitRegistry::new();
        registry.push(Habit::new("Read").unwrap());

        let mut snapshot = registry.list();
        snapshot.clear();

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_and_restore_keeps_position() {
        let mut registry = HabitRegistry::new();
        let habits: Vec<_> = ["A", "B", "C"].iter().map(|n| Habit::new(n).unwrap()).collect();
        for habit in &habits {
            registry.push(habit.clone());
        }

        let (index, removed) = registry.remove(&habits[1].id).unwrap();
        assert_eq!(index, 1);
        assert!(registry.remove(&habits[1].id).is_none());

        registry.restore(index, removed);
        assert_eq!(registry.list(), habits);
    }

    #[test]
    fn test_from_habits_drops_duplicate_ids() {
        let habit = Habit::new("Read").unwrap();
        let registry = HabitRegistry::from_habits(vec![habit.clone(), habit]);
        assert_eq!(registry.len(), 1);
    }
}
