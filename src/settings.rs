/// User preferences persisted alongside habit data
///
/// Settings live under their own keys, so clearing habit data leaves them in place.

use serde::Serialize;

use crate::domain::Theme;
use crate::storage::{KeyValueStore, StorageError, NOTIFICATIONS_KEY, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub theme: Theme,
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            notifications: true,
        }
    }
}

impl Settings {
    /// Load settings, falling back to the default for any missing or unreadable field
    pub fn load<S: KeyValueStore>(backend: &S) -> Result<Self, StorageError> {
        let defaults = Self::default();

        let theme = match backend.get(THEME_KEY)? {
            Some(raw) => raw.parse::<Theme>().unwrap_or_else(|_| {
                tracing::warn!("Ignoring unreadable theme setting: {:?}", raw);
                defaults.theme
            }),
            None => defaults.theme,
        };

        let notifications = match backend.get(NOTIFICATIONS_KEY)? {
            Some(raw) => serde_json::from_str::<bool>(&raw).unwrap_or_else(|_| {
                tracing::warn!("Ignoring unreadable notifications setting: {:?}", raw);
                defaults.notifications
            }),
            None => defaults.notifications,
        };

        Ok(Self { theme, notifications })
    }

    /// Write both settings in one step
    pub fn save<S: KeyValueStore>(&self, backend: &S) -> Result<(), StorageError> {
        backend.put_many(&[
            (THEME_KEY, self.theme.as_str().to_string()),
            (NOTIFICATIONS_KEY, serde_json::to_string(&self.notifications)?),
        ])?;

        tracing::debug!("Saved settings: theme = {}, notifications = {}", self.theme, self.notifications);
        Ok(())
    }
}
