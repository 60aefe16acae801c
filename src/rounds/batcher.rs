//! Round batching: one item per destination per round.
//!
//! The batcher owns the destination queues and the active batch (the
//! tray). A round is complete when the batch empties through correct
//! matches; the game is complete when that happens with every queue empty.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::partition::{DestinationQueue, Partition};
use crate::catalog::Item;
use crate::core::{DestinationId, GameRng, ItemId};

/// Progress of the active batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    /// Items remain in the tray.
    InProgress,
    /// Tray is empty and more rounds are queued.
    RoundComplete,
    /// Tray is empty and every queue is exhausted.
    GameComplete,
}

/// Result of [`RoundBatcher::load_next_batch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchLoad {
    /// A new batch is in the tray.
    Loaded {
        /// 1-based round number of the new batch.
        round: usize,
        /// Items in the new batch.
        size: usize,
    },
    /// A queue ran dry; no batch can be formed. The game is over.
    Exhausted,
    /// The current batch still has items; nothing was loaded.
    Pending,
}

/// Owns the per-destination queues and the active batch.
#[derive(Clone, Debug)]
pub struct RoundBatcher {
    queues: Vec<DestinationQueue>,
    active: Vector<Item>,
    round_index: usize,
    max_rounds: usize,
    rng: GameRng,
}

impl RoundBatcher {
    /// Create a batcher over partitioned queues. No batch is loaded yet.
    ///
    /// `rng` shuffles tray order only.
    #[must_use]
    pub fn new(partition: Partition, rng: GameRng) -> Self {
        Self {
            queues: partition.queues,
            active: Vector::new(),
            round_index: 0,
            max_rounds: partition.max_rounds,
            rng,
        }
    }

    /// Pop the front item of every queue into a freshly shuffled batch.
    ///
    /// If any queue is already empty nothing is popped and the game is
    /// over. Refuses to load while the current batch still has items.
    pub fn load_next_batch(&mut self) -> BatchLoad {
        if !self.active.is_empty() {
            return BatchLoad::Pending;
        }
        if self.queues.is_empty() || self.queues.iter().any(DestinationQueue::is_empty) {
            return BatchLoad::Exhausted;
        }

        let mut batch: Vec<Item> = self
            .queues
            .iter_mut()
            .filter_map(|q| q.items.pop_front())
            .collect();
        self.rng.shuffle(&mut batch);

        let size = batch.len();
        self.active = batch.into_iter().collect();
        self.round_index += 1;

        debug!(round = self.round_index, size, "batch loaded");
        BatchLoad::Loaded {
            round: self.round_index,
            size,
        }
    }

    /// The active batch, in tray display order.
    #[must_use]
    pub fn active(&self) -> &Vector<Item> {
        &self.active
    }

    /// Find an item in the active batch.
    #[must_use]
    pub fn find(&self, id: &ItemId) -> Option<&Item> {
        self.active.iter().find(|i| &i.id == id)
    }

    /// Remove an item from the active batch.
    pub fn take(&mut self, id: &ItemId) -> Option<Item> {
        let index = self.active.iter().position(|i| &i.id == id)?;
        Some(self.active.remove(index))
    }

    /// Classify the active batch.
    #[must_use]
    pub fn status(&self) -> BatchStatus {
        if !self.active.is_empty() {
            BatchStatus::InProgress
        } else if self.has_queued() {
            BatchStatus::RoundComplete
        } else {
            BatchStatus::GameComplete
        }
    }

    /// True if any queue still holds items.
    #[must_use]
    pub fn has_queued(&self) -> bool {
        self.queues.iter().any(|q| !q.is_empty())
    }

    /// Items still queued across all destinations.
    #[must_use]
    pub fn queued_len(&self) -> usize {
        self.queues.iter().map(DestinationQueue::len).sum()
    }

    /// Items still queued for one destination.
    #[must_use]
    pub fn queue_len(&self, destination: &DestinationId) -> usize {
        self.queues
            .iter()
            .find(|q| &q.destination == destination)
            .map_or(0, DestinationQueue::len)
    }

    /// Participating destinations, in queue order.
    pub fn destinations(&self) -> impl Iterator<Item = &DestinationId> {
        self.queues.iter().map(|q| &q.destination)
    }

    /// Current round (0 before the first batch).
    #[must_use]
    pub fn round_index(&self) -> usize {
        self.round_index
    }

    /// Number of playable rounds.
    #[must_use]
    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }
}
