//! Import/export commands.

use crate::state::AppState;
use crate::transfer::{self, Export, ImportReport};
use std::fs;
use std::path::Path;

use super::CommandError;

/// Import flashcards from a file in the line format.
pub fn import_file(state: &AppState, path: &Path) -> Result<ImportReport, CommandError> {
    let content = fs::read_to_string(path)?;
    tracing::info!(path = %path.display(), "importing flashcards");
    import_text(state, &content)
}

pub fn import_text(state: &AppState, content: &str) -> Result<ImportReport, CommandError> {
    transfer::import_flashcards(&state.repository, content).map_err(Into::into)
}

/// Export one category, or everything when `category_id` is `None`.
pub fn export_flashcards(state: &AppState, category_id: Option<i64>) -> Result<String, CommandError> {
    Ok(export(state, category_id)?.text)
}

fn export(state: &AppState, category_id: Option<i64>) -> Result<Export, CommandError> {
    let export = match category_id {
        Some(id) => transfer::export_category(&state.repository, id)?,
        None => transfer::export_all(&state.repository)?,
    };
    Ok(export)
}

/// Export to `path`; returns the number of flashcards written.
pub fn export_to_file(
    state: &AppState,
    category_id: Option<i64>,
    path: &Path,
) -> Result<usize, CommandError> {
    let export = export(state, category_id)?;
    fs::write(path, &export.text)?;
    let count = export.flashcards;
    tracing::info!(path = %path.display(), count, "flashcards exported");
    Ok(count)
}
