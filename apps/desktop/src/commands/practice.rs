//! Practice session commands.

use crate::db::SqliteRepository;
use crate::state::AppState;
use flashdeck_core::types::{GamificationStats, PracticeMode, QuestionCount};
use flashdeck_core::{GamificationAccumulator, PracticeSession, SessionSummary};
use serde::Serialize;

use super::CommandError;

/// Result of recording a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionOutcome {
    pub summary: SessionSummary,
    pub unlocked_badges: Vec<String>,
    pub progress: GamificationStats,
}

/// Start a session over the state's store; the first question is ready on return.
pub fn open_practice_session(
    state: &AppState,
    category_id: i64,
    mode: PracticeMode,
    count: QuestionCount,
) -> Result<PracticeSession<&SqliteRepository>, CommandError> {
    let mut session = PracticeSession::new(&state.repository);
    session.start(category_id, mode, count)?;
    Ok(session)
}

/// Feed a finished session into points, streak and badges.
pub fn finish_practice_session(
    state: &AppState,
    summary: SessionSummary,
) -> Result<SessionOutcome, CommandError> {
    let accumulator = GamificationAccumulator::new(&state.repository);
    let unlocked_badges = accumulator.record_session_result(summary.correct_answers, summary.perfect)?;
    let progress = accumulator.stats()?;
    Ok(SessionOutcome {
        summary,
        unlocked_badges,
        progress,
    })
}
