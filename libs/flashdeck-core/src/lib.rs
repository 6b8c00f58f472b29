//! Core flashcard practice library shared by the desktop app and its CLI.
//!
//! Provides:
//! - Data model (Category, Flashcard, FlashcardAnswer, statistics, settings)
//! - Question selection and the practice session engine
//! - Points, streak and badge accumulation
//! - Import/export line format
//! - Store traits the engine is injected with

pub mod error;
pub mod gamification;
pub mod parser;
pub mod selector;
pub mod session;
pub mod store;
pub mod types;
pub mod validation;

pub use error::{GamificationError, ParseError, Result, SessionError, ValidationError};
pub use gamification::{apply_session_result, BadgeThreshold, GamificationAccumulator, BADGE_THRESHOLDS};
pub use parser::{format_line, parse, ImportRecord, ParsedImport, SkippedLine};
pub use selector::select_questions;
pub use session::{
    AnswerFeedback, PracticeSession, Question, RevealStep, SessionEvent, SessionState, SessionSummary,
};
pub use store::{GamificationStore, PracticeStore};
pub use types::{
    AnswerDraft, AppSettings, Category, CategoryStats, DailyStat, Flashcard, FlashcardAnswer,
    FlashcardDraft, GamificationStats, LicenseStatus, PracticeMode, QuestionCount, Theme,
};
pub use validation::{validate_category_name, validate_flashcard};
