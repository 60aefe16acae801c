//! Session and layout configuration.
//!
//! Shells configure the engine at startup by providing:
//! - `SessionConfig`: round cap, scoring constants, reward cadence, seed
//! - `LayoutConfig`: stage proportions used by [`StageLayout`](super::StageLayout)
//!
//! Nothing is read from files or the environment; the shell owns both.

use serde::{Deserialize, Serialize};

/// Default ceiling on rounds per session.
pub const DEFAULT_CAP_ROUNDS: usize = 5;

/// Scoring, progression and shuffling parameters for one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Upper bound on rounds, regardless of supply (default: 5).
    pub cap_rounds: usize,

    /// Points for every correct match (default: 100).
    pub base_points: u64,

    /// Extra points per step of streak already held (default: 25).
    pub streak_bonus: u64,

    /// A reward (feather) is granted every time the streak reaches a
    /// multiple of this (default: 3). Zero behaves as 1.
    pub reward_interval: u32,

    /// Losing a streak longer than this emits an encouragement cue
    /// (default: 2).
    pub encouragement_threshold: u32,

    /// Shuffle seed. `None` draws a fresh one per session.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cap_rounds: DEFAULT_CAP_ROUNDS,
            base_points: 100,
            streak_bonus: 25,
            reward_interval: 3,
            encouragement_threshold: 2,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Set the round ceiling.
    #[must_use]
    pub fn with_cap_rounds(mut self, cap: usize) -> Self {
        self.cap_rounds = cap;
        self
    }

    /// Set the base points and per-streak bonus.
    #[must_use]
    pub fn with_points(mut self, base: u64, streak_bonus: u64) -> Self {
        self.base_points = base;
        self.streak_bonus = streak_bonus;
        self
    }

    /// Set the reward cadence. Zero is treated as 1.
    #[must_use]
    pub fn with_reward_interval(mut self, interval: u32) -> Self {
        self.reward_interval = interval.max(1);
        self
    }

    /// Set the encouragement threshold.
    #[must_use]
    pub fn with_encouragement_threshold(mut self, threshold: u32) -> Self {
        self.encouragement_threshold = threshold;
        self
    }

    /// Fix the shuffle seed for reproducible sessions.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Stage proportions, relative to the measured stage size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal position of the stage centre, as a fraction of the width
    /// (default: 0.62, leaving room for the tray on the left).
    pub center_x_ratio: f64,

    /// Stage radius as a fraction of the smaller stage dimension
    /// (default: 0.45).
    pub radius_ratio: f64,

    /// Destination ring radius as a fraction of the stage radius
    /// (default: 0.75).
    pub ring_ratio: f64,

    /// Snap tolerance as a fraction of the stage radius (default: 0.2).
    pub snap_ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center_x_ratio: 0.62,
            radius_ratio: 0.45,
            ring_ratio: 0.75,
            snap_ratio: 0.2,
        }
    }
}

impl LayoutConfig {
    /// Set the snap tolerance ratio.
    #[must_use]
    pub fn with_snap_ratio(mut self, ratio: f64) -> Self {
        self.snap_ratio = ratio;
        self
    }

    /// Set the destination ring ratio.
    #[must_use]
    pub fn with_ring_ratio(mut self, ratio: f64) -> Self {
        self.ring_ratio = ratio;
        self
    }

    /// Centre the stage horizontally.
    #[must_use]
    pub fn centered(mut self) -> Self {
        self.center_x_ratio = 0.5;
        self
    }
}
