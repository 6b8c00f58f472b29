//! Error types for flashdeck-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing an import line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing category at line {line}")]
    MissingCategory { line: usize },

    #[error("missing question at line {line}")]
    MissingQuestion { line: usize },

    #[error("no answers at line {line}")]
    MissingAnswers { line: usize },
}

/// Input rejected before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("category name must not be empty")]
    EmptyCategoryName,

    #[error("category already exists: {0}")]
    DuplicateCategory(String),

    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("flashcard needs at least one answer")]
    NoAnswers,

    #[error("flashcard needs at least one correct answer")]
    NoCorrectAnswer,

    #[error("question already exists in this category: {0}")]
    DuplicateQuestion(String),

    #[error("text must not contain {marker}: {text:?}")]
    ReservedText { text: String, marker: &'static str },
}

/// Errors raised by the practice session engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no session has been started")]
    NotStarted,

    #[error("a session is already running; stop it first")]
    AlreadyActive,

    #[error("session is not active")]
    NotActive,

    #[error("category {0} has no flashcards")]
    NoFlashcards(i64),

    #[error("no questions were selected")]
    NoQuestions,

    #[error("operation is not available in {0} mode")]
    WrongMode(&'static str),

    #[error("previous answer is still being processed")]
    AnswerInFlight,

    #[error("no answered question to advance from")]
    NothingToAdvance,

    #[error("answer {answer_id} does not belong to flashcard {flashcard_id}")]
    ForeignAnswer { answer_id: i64, flashcard_id: i64 },

    #[error("could not draw a new question after {attempts} attempts")]
    SamplingExhausted { attempts: usize },

    #[error("store error: {0}")]
    Store(String),
}

/// Errors raised while recording session results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GamificationError {
    #[error("store error: {0}")]
    Store(String),
}
