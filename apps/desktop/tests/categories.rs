//! Category and flashcard management through the command layer.

mod common;

use common::{fixtures, TestContext};
use flashdeck_core::types::{AnswerDraft, FlashcardDraft};
use flashdeck_lib::commands;
use flashdeck_lib::db::{FlashcardRepository, StatsRepository};
use pretty_assertions::assert_eq;

#[test]
fn test_list_categories_with_stats() {
    let ctx = TestContext::new();
    let (math, cards) = ctx.seeded_category("Math", 2);
    ctx.category("art");
    ctx.repo().update_flashcard_stats(cards[0].id, true).unwrap();
    ctx.repo().update_flashcard_stats(cards[1].id, false).unwrap();

    let listed = commands::list_categories(&ctx.state).unwrap();

    let names: Vec<_> = listed.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["art", "Math"]);
    assert_eq!(listed[1].category_id, math.id);
    assert_eq!(listed[1].flashcard_count, 2);
    assert_eq!(listed[1].accuracy(), Some(0.5));
    assert_eq!(listed[0].accuracy(), None);
}

#[test]
fn test_find_category_ignores_case() {
    let ctx = TestContext::new();
    let geo = ctx.category("Geography");

    assert_eq!(commands::find_category(&ctx.state, " geography ").unwrap(), geo);
    assert!(commands::find_category(&ctx.state, "History").is_err());
}

#[test]
fn test_duplicate_category_rejected() {
    let ctx = TestContext::new();
    ctx.category("Math");

    let err = commands::create_category(&ctx.state, "MATH").unwrap_err();
    assert!(err.message.contains("MATH"));
}

#[test]
fn test_delete_category_removes_cards_and_history() {
    let ctx = TestContext::new();
    let (math, cards) = ctx.seeded_category("Math", 2);
    let (other, _) = ctx.seeded_category("Other", 1);
    ctx.repo().update_flashcard_stats(cards[0].id, true).unwrap();

    commands::delete_category(&ctx.state, math.id).unwrap();

    assert!(ctx.repo().get_flashcard(cards[0].id).unwrap().is_none());
    assert!(ctx.repo().get_answers_for_flashcard(cards[0].id).unwrap().is_empty());
    assert!(ctx.repo().get_daily_statistics().unwrap().is_empty());
    assert_eq!(ctx.repo().get_flashcards_by_category(other.id).unwrap().len(), 1);
}

#[test]
fn test_flashcard_crud() {
    let ctx = TestContext::new();
    let math = ctx.category("Math");

    let card = commands::add_flashcard(&ctx.state, math.id, &fixtures::addition_card(2)).unwrap();
    let detail = commands::get_flashcard(&ctx.state, card.id).unwrap();
    assert_eq!(detail.answers.len(), 2);

    let edited = FlashcardDraft::new(
        "Two plus two?",
        vec![
            AnswerDraft::correct("4"),
            AnswerDraft::incorrect("5"),
            AnswerDraft::incorrect("  "),
        ],
    );
    commands::update_flashcard(&ctx.state, card.id, &edited).unwrap();

    let listed = commands::list_flashcards(&ctx.state, math.id).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].flashcard.question, "Two plus two?");
    let texts: Vec<_> = listed[0].answers.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(texts, vec!["4", "5"]);

    commands::delete_flashcard(&ctx.state, card.id).unwrap();
    assert!(commands::list_flashcards(&ctx.state, math.id).unwrap().is_empty());
    assert!(commands::delete_flashcard(&ctx.state, card.id).is_err());
}

#[test]
fn test_reset_statistics_keeps_cards_and_progress() {
    let ctx = TestContext::new();
    let (math, cards) = ctx.seeded_category("Math", 1);
    ctx.repo().update_flashcard_stats(cards[0].id, true).unwrap();

    commands::reset_statistics(&ctx.state).unwrap();

    let stats = commands::get_category_stats(&ctx.state).unwrap();
    assert_eq!(stats[0].category_id, math.id);
    assert_eq!(stats[0].flashcard_count, 1);
    assert_eq!(stats[0].correct_count, 0);
    assert!(commands::get_daily_statistics(&ctx.state).unwrap().is_empty());
}

#[test]
fn test_update_setting_by_key() {
    let ctx = TestContext::new();

    let settings = commands::update_setting(&ctx.state, "theme", "dark").unwrap();
    assert_eq!(settings.theme.as_str(), "dark");
    let settings = commands::update_setting(&ctx.state, "reminder_time", "06:30").unwrap();
    assert_eq!(settings.reminder_time.format("%H:%M").to_string(), "06:30");

    assert_eq!(commands::get_settings(&ctx.state).unwrap(), settings);
    assert!(commands::update_setting(&ctx.state, "theme", "neon").is_err());
    assert!(commands::update_setting(&ctx.state, "volume", "11").is_err());
}
