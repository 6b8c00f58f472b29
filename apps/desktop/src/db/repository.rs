//! Repository pattern for database access.

use crate::db::date_utils::{format_date, local_day, parse_date};
use crate::db::error::DbError;
use chrono::{DateTime, Local, NaiveTime, Utc};
use flashdeck_core::types::{
    AppSettings, Category, CategoryStats, DailyStat, Flashcard, FlashcardAnswer, FlashcardDraft,
    GamificationStats, LicenseStatus, Theme,
};
use flashdeck_core::{validate_category_name, validate_flashcard, ValidationError};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

type Result<T> = std::result::Result<T, DbError>;

/// Repository for category operations.
pub trait CategoryRepository {
    fn get_categories(&self) -> Result<Vec<Category>>;
    fn get_category(&self, id: i64) -> Result<Option<Category>>;
    fn find_category_by_name(&self, name: &str) -> Result<Option<Category>>;
    fn create_category(&self, name: &str) -> Result<Category>;
    fn rename_category(&self, id: i64, name: &str) -> Result<Category>;
    /// Delete a category together with its flashcards, answers and answer events.
    fn delete_category(&self, id: i64) -> Result<()>;
}

/// Repository for flashcard operations.
pub trait FlashcardRepository {
    fn get_flashcards_by_category(&self, category_id: i64) -> Result<Vec<Flashcard>>;
    fn get_flashcard(&self, id: i64) -> Result<Option<Flashcard>>;
    fn find_flashcard_by_question(&self, category_id: i64, question: &str) -> Result<Option<Flashcard>>;
    fn get_answers_for_flashcard(&self, flashcard_id: i64) -> Result<Vec<FlashcardAnswer>>;
    fn get_correct_answer_text(&self, flashcard_id: i64) -> Result<String>;
    fn add_flashcard(&self, category_id: i64, draft: &FlashcardDraft) -> Result<Flashcard>;
    /// Add a flashcard under a category found by name (case-insensitive) or created for it,
    /// in one transaction. Returns `(flashcard, category_created)`.
    fn import_flashcard(&self, category_name: &str, draft: &FlashcardDraft) -> Result<(Flashcard, bool)>;
    /// Replace question and answers; counters are kept.
    fn update_flashcard(&self, id: i64, draft: &FlashcardDraft) -> Result<Flashcard>;
    fn delete_flashcard(&self, id: i64) -> Result<()>;
}

/// Repository for statistics operations.
pub trait StatsRepository {
    fn update_flashcard_stats(&self, flashcard_id: i64, was_correct: bool) -> Result<()>;
    fn get_daily_statistics(&self) -> Result<Vec<DailyStat>>;
    fn get_category_stats(&self) -> Result<Vec<CategoryStats>>;
    /// Zero every counter and drop all answer events.
    fn reset_statistics(&self) -> Result<()>;
}

/// Repository for the gamification singleton.
pub trait GamificationRepository {
    fn get_gamification_stats(&self) -> Result<GamificationStats>;
    fn save_gamification_stats(&self, stats: &GamificationStats) -> Result<()>;
}

/// Repository for settings operations.
pub trait SettingsRepository {
    fn get_setting(&self, key: &str) -> Result<Option<String>>;
    fn set_setting(&self, key: &str, value: &str) -> Result<()>;
    fn get_app_settings(&self) -> Result<AppSettings>;
    fn save_app_settings(&self, settings: &AppSettings) -> Result<()>;
}

pub const KEY_THEME: &str = "theme";
pub const KEY_SHOW_STATISTICS: &str = "show_statistics";
pub const KEY_REMINDER_ENABLED: &str = "reminder_enabled";
pub const KEY_REMINDER_TIME: &str = "reminder_time";
pub const KEY_LICENSE_STATUS: &str = "license_status";

const REMINDER_TIME_FORMAT: &str = "%H:%M";

/// SQLite implementation of repositories.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::PRAGMAS)?;
        self.conn.execute_batch(super::schema::SCHEMA)?;
        Ok(())
    }

    /// Record an answer given at `at`. [`StatsRepository::update_flashcard_stats`] uses the current time.
    pub fn record_answer_at(&self, flashcard_id: i64, was_correct: bool, at: DateTime<Local>) -> Result<()> {
        let column = if was_correct { "correct_count" } else { "incorrect_count" };
        let tx = self.conn.unchecked_transaction()?;

        let updated = tx.execute(
            &format!("UPDATE flashcards SET {column} = {column} + 1 WHERE id = ?1"),
            params![flashcard_id],
        )?;
        if updated == 0 {
            return Err(DbError::FlashcardNotFound(flashcard_id));
        }

        tx.execute(
            "INSERT INTO answer_events (flashcard_id, answered_at, answered_on, was_correct) VALUES (?1, ?2, ?3, ?4)",
            params![
                flashcard_id,
                at.with_timezone(&Utc).to_rfc3339(),
                format_date(local_day(at)),
                was_correct,
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn row_to_flashcard(row: &rusqlite::Row) -> rusqlite::Result<Flashcard> {
        Ok(Flashcard {
            id: row.get(0)?,
            category_id: row.get(1)?,
            question: row.get(2)?,
            correct_count: row.get(3)?,
            incorrect_count: row.get(4)?,
        })
    }

    fn insert_flashcard(conn: &Connection, category_id: i64, draft: FlashcardDraft) -> Result<Flashcard> {
        conn.execute(
            "INSERT INTO flashcards (category_id, question) VALUES (?1, ?2)",
            params![category_id, draft.question],
        )?;
        let id = conn.last_insert_rowid();
        Self::insert_answers(conn, id, &draft)?;

        Ok(Flashcard {
            id,
            category_id,
            question: draft.question,
            correct_count: 0,
            incorrect_count: 0,
        })
    }

    fn insert_answers(conn: &Connection, flashcard_id: i64, draft: &FlashcardDraft) -> Result<()> {
        let mut stmt = conn.prepare(
            "INSERT INTO flashcard_answers (flashcard_id, answer_text, is_correct) VALUES (?1, ?2, ?3)",
        )?;
        for answer in &draft.answers {
            stmt.execute(params![flashcard_id, answer.text, answer.is_correct])?;
        }
        Ok(())
    }

    fn ensure_unique_question(&self, category_id: i64, question: &str, except: Option<i64>) -> Result<()> {
        if let Some(existing) = self.find_flashcard_by_question(category_id, question)? {
            if Some(existing.id) != except {
                return Err(ValidationError::DuplicateQuestion(question.to_string()).into());
            }
        }
        Ok(())
    }
}

impl CategoryRepository for SqliteRepository {
    fn get_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories ORDER BY name COLLATE NOCASE")?;

        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    fn get_category(&self, id: i64) -> Result<Option<Category>> {
        self.conn
            .query_row(
                "SELECT id, name FROM categories WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Category {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        self.conn
            .query_row(
                "SELECT id, name FROM categories WHERE name = ?1 COLLATE NOCASE",
                params![name.trim()],
                |row| {
                    Ok(Category {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    fn create_category(&self, name: &str) -> Result<Category> {
        let name = validate_category_name(name)?;
        if self.find_category_by_name(&name)?.is_some() {
            return Err(ValidationError::DuplicateCategory(name).into());
        }

        self.conn
            .execute("INSERT INTO categories (name) VALUES (?1)", params![name])?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, name = %name, "created category");
        Ok(Category { id, name })
    }

    fn rename_category(&self, id: i64, name: &str) -> Result<Category> {
        let name = validate_category_name(name)?;
        if let Some(existing) = self.find_category_by_name(&name)? {
            if existing.id != id {
                return Err(ValidationError::DuplicateCategory(name).into());
            }
        }

        let updated = self.conn.execute(
            "UPDATE categories SET name = ?1 WHERE id = ?2",
            params![name, id],
        )?;
        if updated == 0 {
            return Err(DbError::CategoryNotFound(id));
        }
        Ok(Category { id, name })
    }

    fn delete_category(&self, id: i64) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(DbError::CategoryNotFound(id));
        }
        tracing::debug!(id, "deleted category");
        Ok(())
    }
}

impl FlashcardRepository for SqliteRepository {
    fn get_flashcards_by_category(&self, category_id: i64) -> Result<Vec<Flashcard>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category_id, question, correct_count, incorrect_count FROM flashcards WHERE category_id = ?1 ORDER BY id",
        )?;

        let cards = stmt
            .query_map(params![category_id], Self::row_to_flashcard)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(cards)
    }

    fn get_flashcard(&self, id: i64) -> Result<Option<Flashcard>> {
        self.conn
            .query_row(
                "SELECT id, category_id, question, correct_count, incorrect_count FROM flashcards WHERE id = ?1",
                params![id],
                Self::row_to_flashcard,
            )
            .optional()
            .map_err(Into::into)
    }

    fn find_flashcard_by_question(&self, category_id: i64, question: &str) -> Result<Option<Flashcard>> {
        self.conn
            .query_row(
                "SELECT id, category_id, question, correct_count, incorrect_count FROM flashcards
                 WHERE category_id = ?1 AND question = ?2 COLLATE NOCASE",
                params![category_id, question.trim()],
                Self::row_to_flashcard,
            )
            .optional()
            .map_err(Into::into)
    }

    fn get_answers_for_flashcard(&self, flashcard_id: i64) -> Result<Vec<FlashcardAnswer>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, flashcard_id, answer_text, is_correct FROM flashcard_answers WHERE flashcard_id = ?1 ORDER BY id",
        )?;

        let answers = stmt
            .query_map(params![flashcard_id], |row| {
                Ok(FlashcardAnswer {
                    id: row.get(0)?,
                    flashcard_id: row.get(1)?,
                    text: row.get(2)?,
                    is_correct: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(answers)
    }

    fn get_correct_answer_text(&self, flashcard_id: i64) -> Result<String> {
        self.conn
            .query_row(
                "SELECT answer_text FROM flashcard_answers WHERE flashcard_id = ?1 AND is_correct = 1 ORDER BY id LIMIT 1",
                params![flashcard_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(DbError::NoCorrectAnswer(flashcard_id))
    }

    fn add_flashcard(&self, category_id: i64, draft: &FlashcardDraft) -> Result<Flashcard> {
        let draft = validate_flashcard(draft)?;
        if self.get_category(category_id)?.is_none() {
            return Err(DbError::CategoryNotFound(category_id));
        }
        self.ensure_unique_question(category_id, &draft.question, None)?;

        let tx = self.conn.unchecked_transaction()?;
        let card = Self::insert_flashcard(&tx, category_id, draft)?;
        tx.commit()?;
        Ok(card)
    }

    fn import_flashcard(&self, category_name: &str, draft: &FlashcardDraft) -> Result<(Flashcard, bool)> {
        let name = validate_category_name(category_name)?;
        let draft = validate_flashcard(draft)?;

        let tx = self.conn.unchecked_transaction()?;
        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM categories WHERE name = ?1 COLLATE NOCASE",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        let (category_id, created) = match existing {
            Some(id) => (id, false),
            None => {
                tx.execute("INSERT INTO categories (name) VALUES (?1)", params![name])?;
                (tx.last_insert_rowid(), true)
            }
        };

        let duplicate: Option<i64> = tx
            .query_row(
                "SELECT id FROM flashcards WHERE category_id = ?1 AND question = ?2 COLLATE NOCASE",
                params![category_id, draft.question],
                |row| row.get(0),
            )
            .optional()?;
        if duplicate.is_some() {
            return Err(ValidationError::DuplicateQuestion(draft.question).into());
        }

        let card = Self::insert_flashcard(&tx, category_id, draft)?;
        tx.commit()?;
        Ok((card, created))
    }

    fn update_flashcard(&self, id: i64, draft: &FlashcardDraft) -> Result<Flashcard> {
        let draft = validate_flashcard(draft)?;
        let mut card = self.get_flashcard(id)?.ok_or(DbError::FlashcardNotFound(id))?;
        self.ensure_unique_question(card.category_id, &draft.question, Some(id))?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE flashcards SET question = ?1 WHERE id = ?2",
            params![draft.question, id],
        )?;
        tx.execute(
            "DELETE FROM flashcard_answers WHERE flashcard_id = ?1",
            params![id],
        )?;
        Self::insert_answers(&tx, id, &draft)?;
        tx.commit()?;

        card.question = draft.question;
        Ok(card)
    }

    fn delete_flashcard(&self, id: i64) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM flashcards WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(DbError::FlashcardNotFound(id));
        }
        Ok(())
    }
}

impl StatsRepository for SqliteRepository {
    fn update_flashcard_stats(&self, flashcard_id: i64, was_correct: bool) -> Result<()> {
        self.record_answer_at(flashcard_id, was_correct, Local::now())
    }

    fn get_daily_statistics(&self) -> Result<Vec<DailyStat>> {
        let mut stmt = self.conn.prepare(
            "SELECT answered_on,
                SUM(CASE WHEN was_correct = 1 THEN 1 ELSE 0 END) as correct,
                SUM(CASE WHEN was_correct = 0 THEN 1 ELSE 0 END) as incorrect
            FROM answer_events
            GROUP BY answered_on
            ORDER BY answered_on",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, u32>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(day, correct_count, incorrect_count)| {
                let date = parse_date(&day)
                    .ok_or_else(|| DbError::InvalidData(format!("bad answer date: {day}")))?;
                Ok(DailyStat {
                    date,
                    correct_count,
                    incorrect_count,
                })
            })
            .collect()
    }

    fn get_category_stats(&self) -> Result<Vec<CategoryStats>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.name, COUNT(f.id),
                COALESCE(SUM(f.correct_count), 0),
                COALESCE(SUM(f.incorrect_count), 0)
            FROM categories c
            LEFT JOIN flashcards f ON f.category_id = c.id
            GROUP BY c.id
            ORDER BY c.name COLLATE NOCASE",
        )?;

        let stats = stmt
            .query_map([], |row| {
                Ok(CategoryStats {
                    category_id: row.get(0)?,
                    name: row.get(1)?,
                    flashcard_count: row.get(2)?,
                    correct_count: row.get(3)?,
                    incorrect_count: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(stats)
    }

    fn reset_statistics(&self) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE flashcards SET correct_count = 0, incorrect_count = 0",
            [],
        )?;
        tx.execute("DELETE FROM answer_events", [])?;
        tx.commit()?;
        tracing::info!("statistics reset");
        Ok(())
    }
}

impl GamificationRepository for SqliteRepository {
    fn get_gamification_stats(&self) -> Result<GamificationStats> {
        self.conn.execute_batch(super::schema::INIT_GAMIFICATION)?;

        let (points, streak, badges): (u32, u32, String) = self.conn.query_row(
            "SELECT points, streak, badges FROM gamification_stats WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        Ok(GamificationStats {
            points,
            streak,
            badges: serde_json::from_str(&badges)?,
        })
    }

    fn save_gamification_stats(&self, stats: &GamificationStats) -> Result<()> {
        let badges = serde_json::to_string(&stats.badges)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO gamification_stats (id, points, streak, badges) VALUES (1, ?1, ?2, ?3)",
            params![stats.points, stats.streak, badges],
        )?;
        Ok(())
    }
}

impl SettingsRepository for SqliteRepository {
    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn get_app_settings(&self) -> Result<AppSettings> {
        let mut settings = AppSettings::default();

        if let Some(value) = self.get_setting(KEY_THEME)? {
            match Theme::from_str(&value) {
                Some(theme) => settings.theme = theme,
                None => tracing::warn!(value = %value, "ignoring unknown theme"),
            }
        }
        if let Some(value) = self.get_setting(KEY_SHOW_STATISTICS)? {
            settings.show_statistics = parse_flag(&value, settings.show_statistics);
        }
        if let Some(value) = self.get_setting(KEY_REMINDER_ENABLED)? {
            settings.reminder_enabled = parse_flag(&value, settings.reminder_enabled);
        }
        if let Some(value) = self.get_setting(KEY_REMINDER_TIME)? {
            match NaiveTime::parse_from_str(&value, REMINDER_TIME_FORMAT) {
                Ok(time) => settings.reminder_time = time,
                Err(_) => tracing::warn!(value = %value, "ignoring invalid reminder time"),
            }
        }
        if let Some(value) = self.get_setting(KEY_LICENSE_STATUS)? {
            match LicenseStatus::from_str(&value) {
                Some(status) => settings.license_status = status,
                None => tracing::warn!(value = %value, "ignoring unknown license status"),
            }
        }

        Ok(settings)
    }

    fn save_app_settings(&self, settings: &AppSettings) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let reminder_time = settings.reminder_time.format(REMINDER_TIME_FORMAT).to_string();
        let entries = [
            (KEY_THEME, settings.theme.as_str()),
            (KEY_SHOW_STATISTICS, bool_str(settings.show_statistics)),
            (KEY_REMINDER_ENABLED, bool_str(settings.reminder_enabled)),
            (KEY_REMINDER_TIME, reminder_time.as_str()),
            (KEY_LICENSE_STATUS, settings.license_status.as_str()),
        ];
        for (key, value) in entries {
            tx.execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn parse_flag(value: &str, default: bool) -> bool {
    match value {
        "true" | "1" => true,
        "false" | "0" => false,
        other => {
            tracing::warn!(value = %other, "ignoring invalid boolean setting");
            default
        }
    }
}

impl flashdeck_core::PracticeStore for SqliteRepository {
    type Error = DbError;

    fn get_flashcards_by_category(&self, category_id: i64) -> Result<Vec<Flashcard>> {
        FlashcardRepository::get_flashcards_by_category(self, category_id)
    }

    fn get_answers_for_flashcard(&self, flashcard_id: i64) -> Result<Vec<FlashcardAnswer>> {
        FlashcardRepository::get_answers_for_flashcard(self, flashcard_id)
    }

    fn get_correct_answer_text(&self, flashcard_id: i64) -> Result<String> {
        FlashcardRepository::get_correct_answer_text(self, flashcard_id)
    }

    fn update_flashcard_stats(&self, flashcard_id: i64, was_correct: bool) -> Result<()> {
        StatsRepository::update_flashcard_stats(self, flashcard_id, was_correct)
    }
}

impl flashdeck_core::GamificationStore for SqliteRepository {
    type Error = DbError;

    fn load_gamification_stats(&self) -> Result<GamificationStats> {
        self.get_gamification_stats()
    }

    fn save_gamification_stats(&self, stats: &GamificationStats) -> Result<()> {
        GamificationRepository::save_gamification_stats(self, stats)
    }
}
