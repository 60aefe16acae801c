//! Streak, score, reward and progress tracking.
//!
//! ## Scoring
//!
//! A correct match earns `base_points + prior_streak * streak_bonus`, where
//! `prior_streak` is the streak held before this match. The first correct
//! match of a streak is worth exactly `base_points`; each further one in a
//! row is worth one more bonus step.
//!
//! ## Rewards
//!
//! Every time the streak reaches a multiple of `reward_interval`, one
//! reward (feather) is granted.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::catalog::{Faction, Item};
use crate::core::SessionConfig;
use crate::events::SessionEvent;

/// Cosmetic cues produced by a single match.
pub type Cues = SmallVec<[SessionEvent; 2]>;

/// Completed/total counters for one faction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionProgress {
    pub faction: Faction,
    pub completed: u32,
    pub total: u32,
}

/// What a correct match earned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Award {
    /// Points added to the score.
    pub points: u64,
    /// Cues to forward to the shell.
    pub cues: Cues,
}

/// Scoring and progression state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreTracker {
    base_points: u64,
    streak_bonus: u64,
    reward_interval: u32,
    encouragement_threshold: u32,

    score: u64,
    streak: u32,
    max_streak: u32,
    reward_count: u32,
    completed_total: u32,
    total_items: u32,
    factions: Vec<FactionProgress>,
}

impl ScoreTracker {
    /// Create a tracker for a session playing `items`.
    ///
    /// Faction totals are counted from `items`, so they reflect what is
    /// actually in play rather than the whole catalog.
    pub fn new<'a>(config: &SessionConfig, items: impl IntoIterator<Item = &'a Item>) -> Self {
        let mut factions: Vec<FactionProgress> = Vec::new();
        let mut total_items = 0u32;

        for item in items {
            total_items += 1;
            match factions.iter_mut().find(|p| p.faction == item.faction) {
                Some(progress) => progress.total += 1,
                None => factions.push(FactionProgress {
                    faction: item.faction.clone(),
                    completed: 0,
                    total: 1,
                }),
            }
        }

        Self {
            base_points: config.base_points,
            streak_bonus: config.streak_bonus,
            reward_interval: config.reward_interval.max(1),
            encouragement_threshold: config.encouragement_threshold,
            score: 0,
            streak: 0,
            max_streak: 0,
            reward_count: 0,
            completed_total: 0,
            total_items,
            factions,
        }
    }

    /// Record a correct match of `item`.
    pub fn record_correct(&mut self, item: &Item) -> Award {
        let prior = self.streak;
        let mut cues = Cues::new();

        self.streak += 1;
        let points = self
            .base_points
            .saturating_add(u64::from(prior).saturating_mul(self.streak_bonus));
        self.score = self.score.saturating_add(points);
        self.max_streak = self.max_streak.max(self.streak);

        self.completed_total = (self.completed_total + 1).min(self.total_items);
        if let Some(progress) = self.factions.iter_mut().find(|p| p.faction == item.faction) {
            progress.completed = (progress.completed + 1).min(progress.total);
        }

        if prior == 0 {
            cues.push(SessionEvent::StreakStarted);
        }
        if self.streak % self.reward_interval == 0 {
            self.reward_count += 1;
            cues.push(SessionEvent::RewardEarned {
                streak: self.streak,
                total: self.reward_count,
            });
        }

        Award { points, cues }
    }

    /// Record a wrong or unresolved drop. The streak resets to zero.
    pub fn record_incorrect(&mut self) -> Cues {
        let mut cues = Cues::new();
        if self.streak > self.encouragement_threshold {
            cues.push(SessionEvent::Encouragement {
                lost_streak: self.streak,
            });
        }
        self.streak = 0;
        cues
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn max_streak(&self) -> u32 {
        self.max_streak
    }

    /// Rewards (feathers) earned so far.
    #[must_use]
    pub fn reward_count(&self) -> u32 {
        self.reward_count
    }

    #[must_use]
    pub fn completed_total(&self) -> u32 {
        self.completed_total
    }

    /// Items in play this session.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    /// Per-faction progress, in order of first appearance.
    #[must_use]
    pub fn faction_progress(&self) -> &[FactionProgress] {
        &self.factions
    }

    /// Completed count for one faction (0 if unknown).
    #[must_use]
    pub fn completed_for(&self, faction: &Faction) -> u32 {
        self.factions
            .iter()
            .find(|p| &p.faction == faction)
            .map_or(0, |p| p.completed)
    }
}
