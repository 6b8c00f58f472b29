//! Flashcard commands.

use crate::db::{DbError, FlashcardRepository};
use crate::state::AppState;
use flashdeck_core::types::{Flashcard, FlashcardAnswer, FlashcardDraft};
use serde::Serialize;

use super::CommandError;

/// A flashcard together with its answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlashcardDetail {
    pub flashcard: Flashcard,
    pub answers: Vec<FlashcardAnswer>,
}

pub fn list_flashcards(state: &AppState, category_id: i64) -> Result<Vec<FlashcardDetail>, CommandError> {
    let repo = &state.repository;
    repo.get_flashcards_by_category(category_id)?
        .into_iter()
        .map(|flashcard| -> Result<FlashcardDetail, CommandError> {
            let answers = repo.get_answers_for_flashcard(flashcard.id)?;
            Ok(FlashcardDetail { flashcard, answers })
        })
        .collect()
}

pub fn get_flashcard(state: &AppState, id: i64) -> Result<FlashcardDetail, CommandError> {
    let repo = &state.repository;
    let flashcard = repo.get_flashcard(id)?.ok_or(DbError::FlashcardNotFound(id))?;
    let answers = repo.get_answers_for_flashcard(id)?;
    Ok(FlashcardDetail { flashcard, answers })
}

pub fn add_flashcard(
    state: &AppState,
    category_id: i64,
    draft: &FlashcardDraft,
) -> Result<Flashcard, CommandError> {
    let card = state.repository.add_flashcard(category_id, draft)?;
    tracing::debug!(id = card.id, category_id, "flashcard added");
    Ok(card)
}

pub fn update_flashcard(state: &AppState, id: i64, draft: &FlashcardDraft) -> Result<Flashcard, CommandError> {
    state.repository.update_flashcard(id, draft).map_err(Into::into)
}

pub fn delete_flashcard(state: &AppState, id: i64) -> Result<(), CommandError> {
    state.repository.delete_flashcard(id).map_err(Into::into)
}
