//! Application commands: the layer a frontend binds to.

pub mod category;
pub mod flashcard;
pub mod practice;
pub mod settings;
pub mod stats;
pub mod transfer;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use category::{create_category, delete_category, find_category, list_categories, rename_category};
pub use flashcard::{add_flashcard, delete_flashcard, get_flashcard, list_flashcards, update_flashcard, FlashcardDetail};
pub use practice::{finish_practice_session, open_practice_session, SessionOutcome};
pub use settings::{get_settings, save_settings, update_setting};
pub use stats::{export_statistics_csv, get_category_stats, get_daily_statistics, get_progress, reset_statistics};
pub use transfer::{export_flashcards, export_to_file, import_file, import_text};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CommandError {}

macro_rules! command_error_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for CommandError {
                fn from(e: $ty) -> Self {
                    Self { message: e.to_string() }
                }
            }
        )*
    };
}

command_error_from!(
    crate::db::DbError,
    crate::transfer::TransferError,
    flashdeck_core::SessionError,
    flashdeck_core::GamificationError,
    flashdeck_core::ValidationError,
    std::io::Error,
);
