//! SQLite schema definitions.

/// Connection pragmas applied before the schema.
pub const PRAGMAS: &str = r#"
PRAGMA foreign_keys = ON;
"#;

/// Complete schema for the local SQLite database.
pub const SCHEMA: &str = r#"
-- Categories
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL COLLATE NOCASE UNIQUE
);

-- Flashcards with lifetime answer counters
CREATE TABLE IF NOT EXISTS flashcards (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
    question TEXT NOT NULL,
    correct_count INTEGER NOT NULL DEFAULT 0 CHECK (correct_count >= 0),
    incorrect_count INTEGER NOT NULL DEFAULT 0 CHECK (incorrect_count >= 0)
);

-- Answer options
CREATE TABLE IF NOT EXISTS flashcard_answers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    flashcard_id INTEGER NOT NULL REFERENCES flashcards(id) ON DELETE CASCADE,
    answer_text TEXT NOT NULL,
    is_correct INTEGER NOT NULL DEFAULT 0
);

-- One row per answer given, aggregated into daily statistics
CREATE TABLE IF NOT EXISTS answer_events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    flashcard_id INTEGER NOT NULL REFERENCES flashcards(id) ON DELETE CASCADE,
    answered_at TEXT NOT NULL,
    answered_on TEXT NOT NULL,
    was_correct INTEGER NOT NULL
);

-- Points, streak and badges
CREATE TABLE IF NOT EXISTS gamification_stats (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    points INTEGER NOT NULL DEFAULT 0,
    streak INTEGER NOT NULL DEFAULT 0,
    badges TEXT NOT NULL DEFAULT '[]'
);

-- User preferences
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- Indexes
CREATE UNIQUE INDEX IF NOT EXISTS idx_flashcards_question ON flashcards(category_id, question COLLATE NOCASE);
CREATE INDEX IF NOT EXISTS idx_answers_flashcard ON flashcard_answers(flashcard_id);
CREATE INDEX IF NOT EXISTS idx_events_day ON answer_events(answered_on);
"#;

/// Create the gamification singleton if not present.
pub const INIT_GAMIFICATION: &str = r#"
INSERT OR IGNORE INTO gamification_stats (id) VALUES (1);
"#;
