//! Category commands.

use crate::db::{CategoryRepository, StatsRepository};
use crate::state::AppState;
use flashdeck_core::types::{Category, CategoryStats};

use super::CommandError;

/// List all categories with their flashcard counts and answer totals.
pub fn list_categories(state: &AppState) -> Result<Vec<CategoryStats>, CommandError> {
    state.repository.get_category_stats().map_err(Into::into)
}

/// Look a category up by name, ignoring case.
pub fn find_category(state: &AppState, name: &str) -> Result<Category, CommandError> {
    state
        .repository
        .find_category_by_name(name)?
        .ok_or_else(|| CommandError::new(format!("category not found: {}", name.trim())))
}

pub fn create_category(state: &AppState, name: &str) -> Result<Category, CommandError> {
    state.repository.create_category(name).map_err(Into::into)
}

pub fn rename_category(state: &AppState, id: i64, name: &str) -> Result<Category, CommandError> {
    state.repository.rename_category(id, name).map_err(Into::into)
}

/// Delete a category and everything filed under it.
pub fn delete_category(state: &AppState, id: i64) -> Result<(), CommandError> {
    state.repository.delete_category(id)?;
    tracing::info!(id, "category deleted");
    Ok(())
}
