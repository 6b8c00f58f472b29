//! Shared setup for desktop integration tests.
//!
//! Every test gets its own in-memory database.

#![allow(dead_code)]

pub mod fixtures;

use flashdeck_core::types::{Category, Flashcard, FlashcardDraft};
use flashdeck_lib::db::{CategoryRepository, FlashcardRepository, SqliteRepository};
use flashdeck_lib::AppState;

pub struct TestContext {
    pub state: AppState,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            state: AppState::in_memory().expect("in-memory database"),
        }
    }

    pub fn repo(&self) -> &SqliteRepository {
        &self.state.repository
    }

    pub fn category(&self, name: &str) -> Category {
        self.repo().create_category(name).expect("create category")
    }

    pub fn card(&self, category: &Category, draft: &FlashcardDraft) -> Flashcard {
        self.repo()
            .add_flashcard(category.id, draft)
            .expect("add flashcard")
    }

    /// A category holding `count` single-choice arithmetic cards.
    pub fn seeded_category(&self, name: &str, count: usize) -> (Category, Vec<Flashcard>) {
        let category = self.category(name);
        let cards = (1..=count)
            .map(|i| self.card(&category, &fixtures::addition_card(i)))
            .collect();
        (category, cards)
    }
}
