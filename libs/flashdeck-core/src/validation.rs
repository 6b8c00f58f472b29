//! Input validation for categories and flashcards.
//!
//! Duplicate checks need the store and live there; they reuse [`ValidationError`].

use crate::error::ValidationError;
use crate::parser::{CORRECT_MARKER, FIELD_SEPARATOR, LINE_TERMINATOR};
use crate::types::{AnswerDraft, FlashcardDraft};

const RESERVED: [&str; 5] = [FIELD_SEPARATOR, LINE_TERMINATOR, CORRECT_MARKER, "\n", "\r"];

/// Reject text that would not survive an export/import cycle.
fn check_reserved(text: &str) -> Result<(), ValidationError> {
    match RESERVED.iter().find(|marker| text.contains(**marker)) {
        Some(marker) => Err(ValidationError::ReservedText {
            text: text.to_string(),
            marker: match *marker {
                "\n" | "\r" => "a line break",
                other => other,
            },
        }),
        None => Ok(()),
    }
}

/// Trim a category name and reject empty ones.
pub fn validate_category_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyCategoryName);
    }
    check_reserved(name)?;
    Ok(name.to_string())
}

/// Normalize a flashcard draft and check it can be practiced.
///
/// Question and answer texts are trimmed and blank answers dropped. At least one
/// remaining answer must be marked correct. Format markers and line breaks are rejected.
pub fn validate_flashcard(draft: &FlashcardDraft) -> Result<FlashcardDraft, ValidationError> {
    let question = draft.question.trim();
    if question.is_empty() {
        return Err(ValidationError::EmptyQuestion);
    }
    check_reserved(question)?;

    let answers: Vec<AnswerDraft> = draft
        .answers
        .iter()
        .filter_map(|a| {
            let text = a.text.trim();
            (!text.is_empty()).then(|| AnswerDraft {
                text: text.to_string(),
                is_correct: a.is_correct,
            })
        })
        .collect();
    for answer in &answers {
        check_reserved(&answer.text)?;
    }

    if answers.is_empty() {
        return Err(ValidationError::NoAnswers);
    }
    if !answers.iter().any(|a| a.is_correct) {
        return Err(ValidationError::NoCorrectAnswer);
    }

    Ok(FlashcardDraft {
        question: question.to_string(),
        answers,
    })
}
