//! Statistics commands.

use crate::db::{GamificationRepository, StatsRepository};
use crate::state::AppState;
use crate::transfer::export_daily_stats_csv;
use flashdeck_core::types::{CategoryStats, DailyStat, GamificationStats};
use std::fs;
use std::path::Path;

use super::CommandError;

/// Answers per day, oldest first.
pub fn get_daily_statistics(state: &AppState) -> Result<Vec<DailyStat>, CommandError> {
    state.repository.get_daily_statistics().map_err(Into::into)
}

pub fn get_category_stats(state: &AppState) -> Result<Vec<CategoryStats>, CommandError> {
    state.repository.get_category_stats().map_err(Into::into)
}

/// Write daily statistics as CSV to `path`.
pub fn export_statistics_csv(state: &AppState, path: &Path) -> Result<(), CommandError> {
    let csv = export_daily_stats_csv(&state.repository)?;
    fs::write(path, csv)?;
    tracing::info!(path = %path.display(), "statistics exported");
    Ok(())
}

pub fn reset_statistics(state: &AppState) -> Result<(), CommandError> {
    state.repository.reset_statistics().map_err(Into::into)
}

/// Points, streak and badges.
pub fn get_progress(state: &AppState) -> Result<GamificationStats, CommandError> {
    state.repository.get_gamification_stats().map_err(Into::into)
}
