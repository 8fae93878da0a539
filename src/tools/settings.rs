/// Tools for user settings and data management
///
/// This module implements the settings_get, settings_update and data_clear
/// MCP tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Theme};
use crate::settings::Settings;
use crate::storage::KeyValueStore;
use crate::store::{HabitStore, StoreError};

/// Parameters for reading settings
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct GetSettingsParams {}

/// Parameters for updating settings
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct UpdateSettingsParams {
    /// Color theme: "light" or "dark" (optional)
    pub theme: Option<String>,
    /// Whether reminders are enabled (optional)
    pub notifications: Option<bool>,
}

/// Parameters for wiping habit data
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ClearDataParams {
    /// Must be true; deletion cannot be undone
    #[serde(default)]
    pub confirm: bool,
}

/// Response carrying the current settings
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub settings: Settings,
    pub message: String,
}

/// Response from wiping habit data
#[derive(Debug, Serialize)]
pub struct ClearDataResponse {
    pub cleared: bool,
    pub message: String,
}

fn describe(settings: &Settings) -> String {
    format!(
        "⚙️ **Settings**\n- Theme: {}\n- Notifications: {}",
        settings.theme,
        if settings.notifications { "on" } else { "off" }
    )
}

/// Read the current settings
pub fn get_settings<S: KeyValueStore>(
    store: &HabitStore<S>,
    _params: GetSettingsParams,
) -> Result<SettingsResponse, StoreError> {
    let settings = Settings::load(store.backend())?;
    Ok(SettingsResponse {
        message: describe(&settings),
        settings,
    })
}

/// Change one or both settings
pub fn update_settings<S: KeyValueStore>(
    store: &HabitStore<S>,
    params: UpdateSettingsParams,
) -> Result<SettingsResponse, StoreError> {
    if params.theme.is_none() && params.notifications.is_none() {
        return Err(DomainError::InvalidArgument(
            "Nothing to update: provide theme and/or notifications".to_string()
        ).into());
    }

    let mut settings = Settings::load(store.backend())?;
    if let Some(theme) = params.theme {
        settings.theme = theme.parse::<Theme>()?;
    }
    if let Some(notifications) = params.notifications {
        settings.notifications = notifications;
    }
    settings.save(store.backend())?;

    Ok(SettingsResponse {
        message: format!("Settings updated.\n\n{}", describe(&settings)),
        settings,
    })
}

/// Delete every habit and completion; settings are kept
pub fn clear_data<S: KeyValueStore>(
    store: &mut HabitStore<S>,
    params: ClearDataParams,
) -> Result<ClearDataResponse, StoreError> {
    if !params.confirm {
        return Ok(ClearDataResponse {
            cleared: false,
            message: "This deletes all habits and completions and cannot be undone. Call again with confirm: true to proceed.".to_string(),
        });
    }

    let habit_count = store.registry().len();
    store.clear_all()?;

    Ok(ClearDataResponse {
        cleared: true,
        message: format!("🧹 Deleted {} habit(s) and all completion history", habit_count),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_update_and_get_settings() {
        let store = HabitStore::open(MemoryStore::new()).unwrap();

        let response = update_settings(
            &store,
            UpdateSettingsParams { theme: Some("dark".to_string()), notifications: None },
        )
        .unwrap();
        assert_eq!(response.settings.theme, Theme::Dark);
        assert!(response.settings.notifications);

        let response = get_settings(&store, GetSettingsParams::default()).unwrap();
        assert_eq!(response.settings.theme, Theme::Dark);
        assert!(response.message.contains("Theme: dark"));
    }

    #[test]
    fn test_update_rejects_bad_theme_and_empty_update() {
        let store = HabitStore::open(MemoryStore::new()).unwrap();
        assert!(update_settings(&store, UpdateSettingsParams::default()).is_err());
        assert!(update_settings(
            &store,
            UpdateSettingsParams { theme: Some("neon".to_string()), notifications: Some(false) },
        )
        .is_err());
        assert_eq!(get_settings(&store, GetSettingsParams::default()).unwrap().settings, Settings::default());
    }

    #[test]
    fn test_clear_requires_confirmation_and_keeps_settings() {
        let mut store = HabitStore::open(MemoryStore::new()).unwrap();
        store.add_habit("Read").unwrap();
        update_settings(&store, UpdateSettingsParams { theme: Some("dark".to_string()), notifications: None }).unwrap();

        let response = clear_data(&mut store, ClearDataParams { confirm: false }).unwrap();
        assert!(!response.cleared);
        assert_eq!(store.list_habits().len(), 1);

        let response = clear_data(&mut store, ClearDataParams { confirm: true }).unwrap();
        assert!(response.cleared);
        assert!(store.list_habits().is_empty());
        assert_eq!(get_settings(&store, GetSettingsParams::default()).unwrap().settings.theme, Theme::Dark);
    }
}
