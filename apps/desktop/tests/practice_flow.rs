//! Practice sessions against the SQLite store.

mod common;

use common::TestContext;
use flashdeck_core::types::{FlashcardAnswer, PracticeMode, QuestionCount};
use flashdeck_core::{PracticeSession, RevealStep, SessionError, SessionState};
use flashdeck_lib::commands;
use flashdeck_lib::db::{FlashcardRepository, GamificationRepository, StatsRepository};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn pick<S: flashdeck_core::PracticeStore>(session: &PracticeSession<S, StdRng>, correct: bool) -> FlashcardAnswer {
    session
        .current_question()
        .expect("question presented")
        .answers
        .iter()
        .find(|a| a.is_correct == correct)
        .cloned()
        .expect("answer of requested kind")
}

#[test]
fn test_session_with_retry_pass_persists_everything() {
    let ctx = TestContext::new();
    let (math, _) = ctx.seeded_category("Math", 3);
    let mut session = PracticeSession::with_rng(ctx.repo(), StdRng::seed_from_u64(11));
    session
        .start(math.id, PracticeMode::MultipleChoice, QuestionCount::All)
        .unwrap();

    // Miss the first card, answer the rest.
    let missed = session.current_question().unwrap().flashcard.id;
    session.submit_answer(&pick(&session, false)).unwrap();
    assert_eq!(session.advance().unwrap(), SessionState::Active);
    for _ in 0..2 {
        session.submit_answer(&pick(&session, true)).unwrap();
        session.advance().unwrap();
    }

    assert_eq!(session.state(), SessionState::RetryPass);
    assert_eq!(session.current_question().unwrap().flashcard.id, missed);

    session.submit_answer(&pick(&session, true)).unwrap();
    assert_eq!(session.advance().unwrap(), SessionState::Finished);

    let summary = session.summary();
    assert_eq!(summary.correct_answers, 2);
    assert_eq!(summary.incorrect_answers, 1);
    assert!(!summary.perfect);
    drop(session);

    let card = ctx.repo().get_flashcard(missed).unwrap().unwrap();
    assert_eq!((card.correct_count, card.incorrect_count), (1, 1));

    let daily = ctx.repo().get_daily_statistics().unwrap();
    assert_eq!(daily.len(), 1);
    assert_eq!((daily[0].correct_count, daily[0].incorrect_count), (3, 1));

    let outcome = commands::finish_practice_session(&ctx.state, summary).unwrap();
    assert_eq!(outcome.progress.points, 2);
    assert_eq!(outcome.progress.streak, 0);
    assert!(outcome.unlocked_badges.is_empty());
}

#[test]
fn test_limited_session_asks_each_card_once() {
    let ctx = TestContext::new();
    let (math, _) = ctx.seeded_category("Math", 5);
    let mut session = commands::open_practice_session(
        &ctx.state,
        math.id,
        PracticeMode::MultipleChoice,
        QuestionCount::Limit(3),
    )
    .unwrap();

    let mut seen = Vec::new();
    while session.state() != SessionState::Finished {
        seen.push(session.current_question().unwrap().flashcard.id);
        session.submit_answer(&pick(&session, true)).unwrap();
        session.advance().unwrap();
    }

    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 3);
    assert!(session.summary().perfect);
}

#[test]
fn test_perfect_sessions_build_streak_and_badges() {
    let ctx = TestContext::new();
    let (math, _) = ctx.seeded_category("Math", 25);

    for _ in 0..2 {
        let mut session = commands::open_practice_session(
            &ctx.state,
            math.id,
            PracticeMode::MultipleChoice,
            QuestionCount::All,
        )
        .unwrap();
        while session.state() != SessionState::Finished {
            session.submit_answer(&pick(&session, true)).unwrap();
            session.advance().unwrap();
        }
        let summary = session.summary();
        drop(session);
        commands::finish_practice_session(&ctx.state, summary).unwrap();
    }

    let progress = ctx.repo().get_gamification_stats().unwrap();
    assert_eq!(progress.points, 50);
    assert_eq!(progress.streak, 2);
    assert_eq!(progress.badges, vec!["Rookie".to_string()]);
}

#[test]
fn test_reveal_mode_reads_answer_from_store() {
    let ctx = TestContext::new();
    let (math, _) = ctx.seeded_category("Math", 2);
    let mut session = commands::open_practice_session(
        &ctx.state,
        math.id,
        PracticeMode::Flashcard,
        QuestionCount::All,
    )
    .unwrap();

    let first = session.current_question().unwrap().flashcard.clone();
    let expected = ctx.repo().get_correct_answer_text(first.id).unwrap();
    assert_eq!(session.toggle_reveal().unwrap(), RevealStep::Revealed(expected));
    assert_eq!(session.toggle_reveal().unwrap(), RevealStep::Next);
    assert_ne!(session.current_question().unwrap().flashcard.id, first.id);

    // Reveal mode never touches counters.
    assert!(ctx.repo().get_daily_statistics().unwrap().is_empty());
}

#[test]
fn test_empty_category_cannot_start() {
    let ctx = TestContext::new();
    let empty = ctx.category("Empty");

    let err = commands::open_practice_session(
        &ctx.state,
        empty.id,
        PracticeMode::MultipleChoice,
        QuestionCount::All,
    )
    .err()
    .expect("start should fail");
    assert_eq!(err.message, SessionError::NoFlashcards(empty.id).to_string());
}
