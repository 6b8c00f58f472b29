//! Import and export of flashcards and statistics.

use crate::db::date_utils::format_date;
use crate::db::{CategoryRepository, DbError, FlashcardRepository, SqliteRepository, StatsRepository};
use flashdeck_core::types::{Category, DailyStat, FlashcardDraft};
use flashdeck_core::{format_line, parser, SkippedLine, ValidationError};
use serde::Serialize;
use std::io;
use thiserror::Error;

pub const CSV_HEADER: [&str; 3] = ["Date", "Correct", "Incorrect"];

#[derive(Debug, Error)]
pub enum TransferError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("csv output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

type Result<T> = std::result::Result<T, TransferError>;

/// Outcome of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub duplicates: usize,
    pub categories_created: usize,
    pub skipped: Vec<SkippedLine>,
}

/// Import every well-formed line of `content`.
///
/// Categories are matched ignoring case and created on demand. Questions already present
/// in the target category are counted as duplicates and left untouched.
pub fn import_flashcards(repo: &SqliteRepository, content: &str) -> Result<ImportReport> {
    let parsed = parser::parse(content);
    let mut report = ImportReport {
        skipped: parsed.skipped,
        ..Default::default()
    };

    for record in parsed.records {
        let draft = FlashcardDraft::new(record.question, record.answers);
        match repo.import_flashcard(&record.category, &draft) {
            Ok((_, created)) => {
                report.imported += 1;
                if created {
                    report.categories_created += 1;
                }
            }
            Err(DbError::Validation(ValidationError::DuplicateQuestion(question))) => {
                tracing::debug!(line = record.line_number, question = %question, "skipping duplicate");
                report.duplicates += 1;
            }
            Err(DbError::Validation(e)) => skip(&mut report, record.line_number, e),
            Err(e) => return Err(e.into()),
        }
    }

    for line in &report.skipped {
        tracing::warn!(line = line.line, reason = %line.reason, "skipped import line");
    }
    tracing::info!(
        imported = report.imported,
        duplicates = report.duplicates,
        categories_created = report.categories_created,
        skipped = report.skipped.len(),
        "import finished"
    );
    report.skipped.sort_by_key(|s| s.line);
    Ok(report)
}

fn skip(report: &mut ImportReport, line: usize, reason: ValidationError) {
    report.skipped.push(SkippedLine {
        line,
        reason: reason.to_string(),
    });
}

/// Exported lines and the number of flashcards they hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Export {
    pub text: String,
    pub flashcards: usize,
}

/// Export one category, one newline-terminated line per flashcard.
pub fn export_category(repo: &SqliteRepository, category_id: i64) -> Result<Export> {
    let category = repo
        .get_category(category_id)?
        .ok_or(DbError::CategoryNotFound(category_id))?;
    let mut out = Export::default();
    write_category(repo, &category, &mut out)?;
    Ok(out)
}

/// Export every category in name order.
pub fn export_all(repo: &SqliteRepository) -> Result<Export> {
    let mut out = Export::default();
    for category in repo.get_categories()? {
        write_category(repo, &category, &mut out)?;
    }
    Ok(out)
}

fn write_category(repo: &SqliteRepository, category: &Category, out: &mut Export) -> Result<()> {
    for card in repo.get_flashcards_by_category(category.id)? {
        let answers = repo.get_answers_for_flashcard(card.id)?;
        let line = format_line(
            &category.name,
            &card.question,
            answers.iter().map(|a| (a.text.as_str(), a.is_correct)),
        );
        out.text.push_str(&line);
        out.text.push('\n');
        out.flashcards += 1;
    }
    Ok(())
}

/// Daily statistics as CSV text.
pub fn export_daily_stats_csv(repo: &SqliteRepository) -> Result<String> {
    let stats = repo.get_daily_statistics()?;
    let mut buf = Vec::new();
    write_daily_stats_csv(&stats, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

pub fn write_daily_stats_csv<W: io::Write>(stats: &[DailyStat], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for stat in stats {
        wtr.write_record([
            format_date(stat.date),
            stat.correct_count.to_string(),
            stat.incorrect_count.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
