//! Content partitioning: catalog → per-destination queues.
//!
//! Every destination that takes part gets exactly `max_rounds` items, so
//! each round's batch has one item per destination. Supply beyond what the
//! scarcest destination can match is left out of the session.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{Destination, Item};
use crate::core::{DestinationId, GameRng};
use crate::error::SessionError;

/// Not-yet-played items for one destination, front = next to play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DestinationQueue {
    pub destination: DestinationId,
    pub items: VecDeque<Item>,
}

impl DestinationQueue {
    /// Number of items still queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the queue is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Output of [`partition`].
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    /// One queue per participating destination, in destination order.
    pub queues: Vec<DestinationQueue>,

    /// Number of playable rounds (length of every queue).
    pub max_rounds: usize,
}

impl Partition {
    /// Total items across all queues.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.queues.iter().map(DestinationQueue::len).sum()
    }
}

/// Split a catalog into shuffled, equal-length per-destination queues.
///
/// 1. Group items by destination (items pointing at an unknown destination
///    are skipped).
/// 2. Shuffle each group.
/// 3. Drop destinations with no items.
/// 4. `max_rounds = min(cap_rounds, smallest group)`.
/// 5. Truncate every group to `max_rounds`.
///
/// Fails with [`SessionError::NoPlayableRounds`] when `max_rounds` is zero.
pub fn partition(
    items: Vec<Item>,
    destinations: &[Destination],
    cap_rounds: usize,
    rng: &mut GameRng,
) -> Result<Partition, SessionError> {
    let mut groups: FxHashMap<DestinationId, Vec<Item>> = destinations
        .iter()
        .map(|d| (d.id.clone(), Vec::new()))
        .collect();

    for item in items {
        match groups.get_mut(&item.destination) {
            Some(group) => group.push(item),
            None => warn!(
                item = %item.id,
                destination = %item.destination,
                "item points at an unknown destination; skipped"
            ),
        }
    }

    let mut queues = Vec::new();
    for destination in destinations {
        let Some(mut group) = groups.remove(&destination.id) else {
            continue;
        };
        if group.is_empty() {
            continue;
        }
        rng.shuffle(&mut group);
        queues.push(DestinationQueue {
            destination: destination.id.clone(),
            items: group.into(),
        });
    }

    let smallest = queues.iter().map(DestinationQueue::len).min().unwrap_or(0);
    let max_rounds = cap_rounds.min(smallest);

    if max_rounds == 0 {
        return Err(SessionError::NoPlayableRounds {
            destinations: queues.len(),
            cap_rounds,
        });
    }

    for queue in &mut queues {
        if queue.len() > max_rounds {
            debug!(
                destination = %queue.destination,
                unused = queue.len() - max_rounds,
                "truncating surplus supply"
            );
            queue.items.truncate(max_rounds);
        }
    }

    Ok(Partition { queues, max_rounds })
}
