//! Database error types.

use flashdeck_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("category not found: {0}")]
    CategoryNotFound(i64),

    #[error("flashcard not found: {0}")]
    FlashcardNotFound(i64),

    #[error("flashcard {0} has no correct answer")]
    NoCorrectAnswer(i64),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
