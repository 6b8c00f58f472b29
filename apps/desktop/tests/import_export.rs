//! Import/export through the command layer.

mod common;

use common::{fixtures, TestContext};
use flashdeck_core::types::{AnswerDraft, FlashcardDraft};
use flashdeck_lib::commands;
use flashdeck_lib::db::{CategoryRepository, FlashcardRepository};
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn test_import_single_line() {
    let ctx = TestContext::new();

    let report = commands::import_text(&ctx.state, "Math@next@2+2=?@next@3@next@@correct@4@end@").unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(report.categories_created, 1);

    let math = ctx.repo().find_category_by_name("math").unwrap().unwrap();
    let cards = ctx.repo().get_flashcards_by_category(math.id).unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].question, "2+2=?");

    let answers = ctx.repo().get_answers_for_flashcard(cards[0].id).unwrap();
    let summary: Vec<_> = answers.iter().map(|a| (a.text.as_str(), a.is_correct)).collect();
    assert_eq!(summary, vec![("3", false), ("4", true)]);
}

#[test]
fn test_import_mixed_content() {
    let ctx = TestContext::new();

    let report = commands::import_text(&ctx.state, fixtures::mixed_import()).unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.categories_created, 2);
    let skipped_lines: Vec<_> = report.skipped.iter().map(|s| s.line).collect();
    assert_eq!(skipped_lines, vec![5, 6, 7]);
}

#[test]
fn test_import_into_existing_category_ignores_case() {
    let ctx = TestContext::new();
    let math = ctx.category("Math");

    let report = commands::import_text(&ctx.state, "MATH@next@1+1=?@next@@correct@2@end@").unwrap();

    assert_eq!(report.categories_created, 0);
    assert_eq!(ctx.repo().get_categories().unwrap(), vec![math.clone()]);
    assert_eq!(ctx.repo().get_flashcards_by_category(math.id).unwrap().len(), 1);
}

#[test]
fn test_reimport_is_idempotent() {
    let ctx = TestContext::new();
    commands::import_text(&ctx.state, fixtures::mixed_import()).unwrap();

    let again = commands::import_text(&ctx.state, fixtures::mixed_import()).unwrap();

    assert_eq!(again.imported, 0);
    assert_eq!(again.duplicates, 3);
    assert_eq!(again.categories_created, 0);
}

#[test]
fn test_export_round_trip_through_files() {
    let ctx = TestContext::new();
    let (math, _) = ctx.seeded_category("Math", 3);
    ctx.seeded_category("Numbers", 2);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("all.txt");

    let written = commands::export_to_file(&ctx.state, None, &path).unwrap();
    assert_eq!(written, 5);

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.ends_with("@end@\n"));
    assert!(content.contains("Math@next@1+1=?@next@3@next@@correct@2@end@"));

    let fresh = TestContext::new();
    let report = commands::import_file(&fresh.state, &path).unwrap();
    assert_eq!(report.imported, 5);
    assert_eq!(report.categories_created, 2);
    assert!(report.skipped.is_empty());

    assert_eq!(
        commands::export_flashcards(&fresh.state, None).unwrap(),
        content
    );
    assert_eq!(
        commands::export_flashcards(&ctx.state, Some(math.id)).unwrap().lines().count(),
        3
    );
}

#[test]
fn test_format_markers_never_reach_export() {
    let ctx = TestContext::new();
    let math = ctx.category("Math");

    for question in ["a@next@b", "ends@end@", "two\nlines"] {
        let draft = FlashcardDraft::new(question, vec![AnswerDraft::correct("x")]);
        let err = commands::add_flashcard(&ctx.state, math.id, &draft).unwrap_err();
        assert!(err.message.contains("must not contain"), "{}", err.message);
    }
    let draft = FlashcardDraft::new("Q", vec![AnswerDraft::correct("@correct@x")]);
    assert!(commands::add_flashcard(&ctx.state, math.id, &draft).is_err());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("math.txt");
    assert_eq!(commands::export_to_file(&ctx.state, Some(math.id), &path).unwrap(), 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_import_missing_file_reports_error() {
    let ctx = TestContext::new();
    let dir = tempfile::tempdir().unwrap();

    let err = commands::import_file(&ctx.state, &dir.path().join("missing.txt")).unwrap_err();
    assert!(!err.message.is_empty());
}

#[test]
fn test_statistics_csv_file() {
    let ctx = TestContext::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.csv");

    commands::export_statistics_csv(&ctx.state, &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "Date,Correct,Incorrect\n");
}
