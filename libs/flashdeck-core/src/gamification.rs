//! Points, perfect-session streaks and badges.

use crate::error::GamificationError;
use crate::store::GamificationStore;
use crate::types::GamificationStats;

/// A badge unlocked once cumulative points reach `points`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeThreshold {
    pub points: u32,
    pub name: &'static str,
}

/// Badge table, ascending by points.
pub const BADGE_THRESHOLDS: &[BadgeThreshold] = &[
    BadgeThreshold { points: 50, name: "Rookie" },
    BadgeThreshold { points: 200, name: "Pro" },
    BadgeThreshold { points: 500, name: "Expert" },
    BadgeThreshold { points: 1000, name: "Master" },
];

/// Apply one finished session to `stats`; returns badges unlocked by it, in threshold order.
pub fn apply_session_result(
    stats: &mut GamificationStats,
    correct_answers: u32,
    perfect_session: bool,
    thresholds: &[BadgeThreshold],
) -> Vec<String> {
    stats.points = stats.points.saturating_add(correct_answers);
    stats.streak = if perfect_session {
        stats.streak.saturating_add(1)
    } else {
        0
    };

    let mut unlocked = Vec::new();
    for threshold in thresholds {
        if stats.points >= threshold.points && !stats.has_badge(threshold.name) {
            stats.badges.push(threshold.name.to_string());
            unlocked.push(threshold.name.to_string());
        }
    }
    unlocked
}

/// Records session outcomes against a [`GamificationStore`].
pub struct GamificationAccumulator<S> {
    store: S,
    thresholds: &'static [BadgeThreshold],
}

impl<S: GamificationStore> GamificationAccumulator<S> {
    pub fn new(store: S) -> Self {
        Self::with_thresholds(store, BADGE_THRESHOLDS)
    }

    pub fn with_thresholds(store: S, thresholds: &'static [BadgeThreshold]) -> Self {
        Self { store, thresholds }
    }

    /// Load, update and save the singleton record; returns newly unlocked badges.
    pub fn record_session_result(
        &self,
        correct_answers: u32,
        perfect_session: bool,
    ) -> Result<Vec<String>, GamificationError> {
        let mut stats = self.store.load_gamification_stats().map_err(|e| {
            tracing::error!(error = %e, "failed to load gamification stats");
            GamificationError::Store(e.to_string())
        })?;

        let unlocked = apply_session_result(&mut stats, correct_answers, perfect_session, self.thresholds);

        self.store.save_gamification_stats(&stats).map_err(|e| {
            tracing::error!(error = %e, "failed to save gamification stats");
            GamificationError::Store(e.to_string())
        })?;

        tracing::info!(
            points = stats.points,
            streak = stats.streak,
            unlocked = unlocked.len(),
            "recorded session result"
        );
        Ok(unlocked)
    }

    /// Current record without modifying it.
    pub fn stats(&self) -> Result<GamificationStats, GamificationError> {
        self.store
            .load_gamification_stats()
            .map_err(|e| GamificationError::Store(e.to_string()))
    }
}
