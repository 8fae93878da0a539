/// Basic unit tests to verify core functionality
use chrono::NaiveDate;
use habit_tracker::*;
use tempfile::NamedTempFile;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_habit_creation() {
        let habit = Habit::new("  Test Habit ").expect("valid name");
        assert_eq!(habit.name, "Test Habit");

        let fifty = "x".repeat(MAX_HABIT_NAME_LEN);
        assert!(Habit::new(&fifty).is_ok());
        assert!(matches!(Habit::new(&format!("{}x", fifty)), Err(DomainError::InvalidHabitName(_))));
        assert!(matches!(Habit::new("   "), Err(DomainError::InvalidHabitName(_))));
    }

    #[test]
    fn test_day_key_format() {
        let id = HabitId::new();
        let key = DayKey::derive(&id, ymd(2024, 6, 10));
        assert_eq!(key.as_str(), format!("{}-2024-06-10", id));
    }

    #[test]
    fn test_week_window_crosses_month() {
        let today = ymd(2024, 3, 1);
        assert_eq!(date_for_offset(today, 0).unwrap(), ymd(2024, 2, 24));
        assert_eq!(date_for_offset(today, TODAY_OFFSET).unwrap(), today);
        assert!(date_for_offset(today, WEEK_LEN).is_err());
    }

    #[test]
    fn test_percentage_table() {
        let table: Vec<u8> = (0..=7).map(|c| completion_percentage(c, 7)).collect();
        assert_eq!(table, vec![0, 14, 29, 43, 57, 71, 86, 100]);
    }

    #[tokio::test]
    async fn test_server_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = HabitTrackerServer::new(temp_file.path().to_path_buf(), ShareConfig::default()).await;
        assert!(server.is_ok());
        assert!(server.unwrap().store().list_habits().is_empty());
    }

    #[test]
    fn test_storage_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStore::new(temp_file.path().to_path_buf()).expect("Failed to create storage");

        storage.put(THEME_KEY, "dark".to_string()).unwrap();
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(storage.get(HABITS_KEY).unwrap(), None);
    }
}
