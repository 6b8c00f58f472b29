//! Persistence seams used by the session engine and the gamification accumulator.
//!
//! The desktop app implements these over SQLite; tests use in-memory fakes.

use crate::types::{Flashcard, FlashcardAnswer, GamificationStats};
use std::fmt::Display;

/// Flashcard access needed while practicing.
pub trait PracticeStore {
    type Error: Display;

    fn get_flashcards_by_category(&self, category_id: i64) -> Result<Vec<Flashcard>, Self::Error>;
    fn get_answers_for_flashcard(&self, flashcard_id: i64) -> Result<Vec<FlashcardAnswer>, Self::Error>;
    fn get_correct_answer_text(&self, flashcard_id: i64) -> Result<String, Self::Error>;

    /// Increment the persisted counter and record a dated answer event.
    fn update_flashcard_stats(&self, flashcard_id: i64, was_correct: bool) -> Result<(), Self::Error>;
}

/// Singleton points/streak/badge record.
pub trait GamificationStore {
    type Error: Display;

    /// Load the record, creating a zeroed one if none exists.
    fn load_gamification_stats(&self) -> Result<GamificationStats, Self::Error>;

    /// Replace the record in one write.
    fn save_gamification_stats(&self, stats: &GamificationStats) -> Result<(), Self::Error>;
}

impl<T: PracticeStore + ?Sized> PracticeStore for &T {
    type Error = T::Error;

    fn get_flashcards_by_category(&self, category_id: i64) -> Result<Vec<Flashcard>, Self::Error> {
        (**self).get_flashcards_by_category(category_id)
    }

    fn get_answers_for_flashcard(&self, flashcard_id: i64) -> Result<Vec<FlashcardAnswer>, Self::Error> {
        (**self).get_answers_for_flashcard(flashcard_id)
    }

    fn get_correct_answer_text(&self, flashcard_id: i64) -> Result<String, Self::Error> {
        (**self).get_correct_answer_text(flashcard_id)
    }

    fn update_flashcard_stats(&self, flashcard_id: i64, was_correct: bool) -> Result<(), Self::Error> {
        (**self).update_flashcard_stats(flashcard_id, was_correct)
    }
}

impl<T: GamificationStore + ?Sized> GamificationStore for &T {
    type Error = T::Error;

    fn load_gamification_stats(&self) -> Result<GamificationStats, Self::Error> {
        (**self).load_gamification_stats()
    }

    fn save_gamification_stats(&self, stats: &GamificationStats) -> Result<(), Self::Error> {
        (**self).save_gamification_stats(stats)
    }
}
