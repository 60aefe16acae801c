//! Read-only view of a session for one render tick.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::outcome::SessionPhase;
use crate::catalog::Item;
use crate::core::{DestinationId, ItemId};
use crate::effects::{EnteringOffering, FeedbackPulse, ReturningItem};
use crate::scoring::FactionProgress;

/// Delivered items for one destination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationInventory {
    pub destination: DestinationId,
    pub items: Vector<Item>,
    /// Last item delivered here this round, for a highlight.
    pub recent: Option<Item>,
}

/// Everything a renderer needs, owned and cheap to clone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub round_index: usize,
    pub max_rounds: usize,

    /// Tray contents in display order.
    pub active_batch: Vector<Item>,

    pub score: u64,
    pub streak: u32,
    pub max_streak: u32,
    pub reward_count: u32,
    pub completed_total: u32,
    pub total_items: u32,
    pub faction_progress: Vec<FactionProgress>,

    /// One entry per participating destination, in destination order.
    pub inventories: Vec<DestinationInventory>,

    pub pulse: Option<FeedbackPulse>,
    pub returning: Option<ReturningItem>,
    pub entering: Vec<EnteringOffering>,

    /// Tray item to hide: the one being dragged, else the one returning.
    pub hidden_item: Option<ItemId>,

    /// Most recent correct match, cleared on each new batch.
    pub spotlight: Option<Item>,

    pub animation_epoch: u64,
}

impl SessionSnapshot {
    /// Inventory entry for one destination.
    #[must_use]
    pub fn inventory(&self, destination: &DestinationId) -> Option<&DestinationInventory> {
        self.inventories.iter().find(|i| &i.destination == destination)
    }
}
