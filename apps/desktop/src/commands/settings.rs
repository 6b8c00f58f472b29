//! Settings commands.

use crate::db::repository::{
    KEY_LICENSE_STATUS, KEY_REMINDER_ENABLED, KEY_REMINDER_TIME, KEY_SHOW_STATISTICS, KEY_THEME,
};
use crate::db::SettingsRepository;
use crate::state::AppState;
use chrono::NaiveTime;
use flashdeck_core::types::{AppSettings, LicenseStatus, Theme};

use super::CommandError;

pub fn get_settings(state: &AppState) -> Result<AppSettings, CommandError> {
    state.repository.get_app_settings().map_err(Into::into)
}

pub fn save_settings(state: &AppState, settings: &AppSettings) -> Result<(), CommandError> {
    state.repository.save_app_settings(settings).map_err(Into::into)
}

/// Change a single setting by key and return the updated settings.
pub fn update_setting(state: &AppState, key: &str, value: &str) -> Result<AppSettings, CommandError> {
    let mut settings = state.repository.get_app_settings()?;
    let value = value.trim();

    match key {
        KEY_THEME => {
            settings.theme = Theme::from_str(value)
                .ok_or_else(|| invalid(key, value, "system, light or dark"))?;
        }
        KEY_SHOW_STATISTICS => settings.show_statistics = parse_bool(key, value)?,
        KEY_REMINDER_ENABLED => settings.reminder_enabled = parse_bool(key, value)?,
        KEY_REMINDER_TIME => {
            settings.reminder_time = NaiveTime::parse_from_str(value, "%H:%M")
                .map_err(|_| invalid(key, value, "HH:MM"))?;
        }
        KEY_LICENSE_STATUS => {
            settings.license_status = LicenseStatus::from_str(value)
                .ok_or_else(|| invalid(key, value, "unlicensed, trial or licensed"))?;
        }
        other => return Err(CommandError::new(format!("unknown setting: {other}"))),
    }

    save_settings(state, &settings)?;
    Ok(settings)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(invalid(key, value, "true or false")),
    }
}

fn invalid(key: &str, value: &str, expected: &str) -> CommandError {
    CommandError::new(format!("invalid value for {key}: {value} (expected {expected})"))
}
