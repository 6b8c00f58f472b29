//! Core types for the flashcard application.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named group of flashcards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A stored flashcard with its lifetime answer counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: i64,
    pub category_id: i64,
    pub question: String,
    pub correct_count: u32,
    pub incorrect_count: u32,
}

impl Flashcard {
    /// Historical difficulty; higher means the card was missed more often than hit.
    pub fn difficulty(&self) -> i64 {
        i64::from(self.incorrect_count) - i64::from(self.correct_count)
    }
}

/// One answer option of a flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardAnswer {
    pub id: i64,
    pub flashcard_id: i64,
    pub text: String,
    pub is_correct: bool,
}

/// Unsaved answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerDraft {
    pub text: String,
    pub is_correct: bool,
}

impl AnswerDraft {
    pub fn correct(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_correct: true,
        }
    }

    pub fn incorrect(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_correct: false,
        }
    }
}

/// Unsaved flashcard, used for create, edit and import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardDraft {
    pub question: String,
    pub answers: Vec<AnswerDraft>,
}

impl FlashcardDraft {
    pub fn new(question: impl Into<String>, answers: Vec<AnswerDraft>) -> Self {
        Self {
            question: question.into(),
            answers,
        }
    }
}

/// Answers given on a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub correct_count: u32,
    pub incorrect_count: u32,
}

/// Answer totals for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category_id: i64,
    pub name: String,
    pub flashcard_count: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
}

impl CategoryStats {
    /// Share of correct answers, or `None` before anything was answered.
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.correct_count + self.incorrect_count;
        if total == 0 {
            None
        } else {
            Some(f64::from(self.correct_count) / f64::from(total))
        }
    }
}

/// Cumulative points, perfect-session streak and unlocked badges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamificationStats {
    pub points: u32,
    pub streak: u32,
    /// Unique badge names in unlock order.
    pub badges: Vec<String>,
}

impl GamificationStats {
    pub fn has_badge(&self, name: &str) -> bool {
        self.badges.iter().any(|b| b == name)
    }
}

/// How questions are presented during practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeMode {
    MultipleChoice,
    /// Classic reveal mode: show the question, then reveal the answer.
    Flashcard,
}

impl Default for PracticeMode {
    fn default() -> Self {
        Self::MultipleChoice
    }
}

impl PracticeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::Flashcard => "flashcard",
        }
    }
}

impl fmt::Display for PracticeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PracticeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "multiple_choice" | "mc" => Ok(Self::MultipleChoice),
            "flashcard" | "reveal" | "classic" => Ok(Self::Flashcard),
            other => Err(format!("unknown practice mode: {other}")),
        }
    }
}

/// Number of questions requested for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCount {
    All,
    Limit(usize),
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self::All
    }
}

impl FromStr for QuestionCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<usize>()
            .map(Self::Limit)
            .map_err(|_| format!("expected a number or \"all\", got: {s}"))
    }
}

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    System,
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Self::System
    }
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "system" => Some(Self::System),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// License state reported by the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    Unlicensed,
    Trial,
    Licensed,
}

impl Default for LicenseStatus {
    fn default() -> Self {
        Self::Unlicensed
    }
}

impl LicenseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unlicensed => "unlicensed",
            Self::Trial => "trial",
            Self::Licensed => "licensed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "unlicensed" => Some(Self::Unlicensed),
            "trial" => Some(Self::Trial),
            "licensed" => Some(Self::Licensed),
            _ => None,
        }
    }
}

/// Persisted user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub theme: Theme,
    pub show_statistics: bool,
    pub reminder_enabled: bool,
    pub reminder_time: NaiveTime,
    pub license_status: LicenseStatus,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            show_statistics: true,
            reminder_enabled: false,
            reminder_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
            license_status: LicenseStatus::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_is_incorrect_minus_correct() {
        let card = Flashcard {
            id: 1,
            category_id: 1,
            question: "q".into(),
            correct_count: 2,
            incorrect_count: 5,
        };
        assert_eq!(card.difficulty(), 3);
    }

    #[test]
    fn question_count_parses_all_and_numbers() {
        assert_eq!("all".parse::<QuestionCount>(), Ok(QuestionCount::All));
        assert_eq!("ALL".parse::<QuestionCount>(), Ok(QuestionCount::All));
        assert_eq!("10".parse::<QuestionCount>(), Ok(QuestionCount::Limit(10)));
        assert!("ten".parse::<QuestionCount>().is_err());
        assert!("-1".parse::<QuestionCount>().is_err());
    }

    #[test]
    fn practice_mode_parses_aliases() {
        assert_eq!("multiple-choice".parse::<PracticeMode>(), Ok(PracticeMode::MultipleChoice));
        assert_eq!("flashcard".parse::<PracticeMode>(), Ok(PracticeMode::Flashcard));
        assert_eq!("reveal".parse::<PracticeMode>(), Ok(PracticeMode::Flashcard));
        assert!("typing".parse::<PracticeMode>().is_err());
    }

    #[test]
    fn accuracy_is_none_without_answers() {
        let mut stats = CategoryStats {
            category_id: 1,
            name: "Math".into(),
            flashcard_count: 3,
            correct_count: 0,
            incorrect_count: 0,
        };
        assert_eq!(stats.accuracy(), None);
        stats.correct_count = 3;
        stats.incorrect_count = 1;
        assert_eq!(stats.accuracy(), Some(0.75));
    }

    #[test]
    fn default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.theme, Theme::System);
        assert!(settings.show_statistics);
        assert!(!settings.reminder_enabled);
        assert_eq!(settings.reminder_time, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
        assert_eq!(settings.license_status, LicenseStatus::Unlicensed);
    }
}
