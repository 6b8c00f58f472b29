//! Question selection for a practice session.

use crate::types::{Flashcard, PracticeMode, QuestionCount};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Reverse;

/// Build the working set for a new session.
///
/// In multiple-choice mode the hardest cards (highest `incorrect - correct`) are kept
/// when fewer than the whole pool is requested. Reveal mode always uses the whole
/// pool. The result is shuffled either way, so difficulty only decides *which*
/// cards are asked, never their order.
pub fn select_questions<R: Rng + ?Sized>(
    mut pool: Vec<Flashcard>,
    count: QuestionCount,
    mode: PracticeMode,
    rng: &mut R,
) -> Vec<Flashcard> {
    if mode == PracticeMode::MultipleChoice {
        // Stable, so equally difficult cards keep store order before the shuffle.
        pool.sort_by_key(|card| Reverse(card.difficulty()));
        if let QuestionCount::Limit(limit) = count {
            pool.truncate(limit);
        }
    }

    pool.shuffle(rng);
    pool
}
