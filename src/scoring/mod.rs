//! Scoring and progression.
//!
//! `ScoreTracker` owns score, streak, max streak, rewards and per-faction
//! progress. It emits cosmetic cues but never changes state because of them.

pub mod tracker;

pub use tracker::{Award, Cues, FactionProgress, ScoreTracker};
