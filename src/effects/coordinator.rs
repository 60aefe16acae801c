//! Effect coordinator: transient intents and destination inventories.
//!
//! ## State machines
//!
//! - Feedback pulse: `Idle → Active → Idle` on `complete_pulse`. A new
//!   pulse supersedes the active one.
//! - Returning item: `Idle → Active → Idle` on `complete_return`. A new
//!   return supersedes the active one.
//! - Entering offerings: any number in flight. `complete_offering` removes
//!   one and appends its item to the destination inventory. Delivery
//!   happens here, not at drop time.
//!
//! Nothing times out. An intent whose renderer never reports completion
//! stays pending until acknowledged or flushed.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::intents::{EnteringOffering, FeedbackPulse, IntentSlot, PulseKind, ReturningItem};
use crate::catalog::Item;
use crate::core::{DestinationId, ItemId, OfferingId, Point};

/// Owns every transient intent and the per-destination inventories.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EffectCoordinator {
    pulse: IntentSlot<FeedbackPulse>,
    returning: IntentSlot<ReturningItem>,
    entering: Vec<EnteringOffering>,

    /// Delivered items per destination, append-only.
    inventories: FxHashMap<DestinationId, Vector<Item>>,

    /// Last item delivered to each destination this round.
    recent_deliveries: FxHashMap<DestinationId, Item>,

    next_pulse_key: u64,
    next_offering: u64,
    animation_epoch: u64,
}

impl EffectCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Feedback pulse ===

    /// Show a pulse at `position`, superseding any active pulse.
    pub fn show_pulse(&mut self, position: Point, kind: PulseKind) -> u64 {
        let key = self.next_pulse_key;
        self.next_pulse_key += 1;

        if let Some(previous) = self.pulse.replace(FeedbackPulse { position, kind, key }) {
            debug!(superseded = previous.key, key, "pulse superseded");
        }
        key
    }

    /// Renderer finished the pulse. Returns false if none was active.
    pub fn complete_pulse(&mut self) -> bool {
        self.pulse.clear().is_some()
    }

    #[must_use]
    pub fn pulse(&self) -> Option<&FeedbackPulse> {
        self.pulse.active()
    }

    // === Returning item ===

    /// Send `item` back to its tray slot, superseding any active return.
    pub fn start_return(&mut self, item: Item, from: Point, to: Point) {
        if let Some(previous) = self.returning.replace(ReturningItem { item, from, to }) {
            debug!(superseded = %previous.item.id, "return superseded");
        }
    }

    /// Renderer finished the return animation.
    pub fn complete_return(&mut self) -> Option<ReturningItem> {
        self.returning.clear()
    }

    /// Drop the active return if it is for `item`.
    pub fn cancel_return_for(&mut self, item: &ItemId) -> bool {
        let matches = self.returning.active().is_some_and(|r| &r.item.id == item);
        if matches {
            self.returning.clear();
        }
        matches
    }

    #[must_use]
    pub fn returning(&self) -> Option<&ReturningItem> {
        self.returning.active()
    }

    // === Entering offerings ===

    /// Start an offering on its way to `destination`.
    pub fn launch_offering(
        &mut self,
        item: Item,
        destination: DestinationId,
        from: Point,
        to: Point,
    ) -> OfferingId {
        let id = OfferingId::new(self.next_offering);
        self.next_offering += 1;

        self.entering.push(EnteringOffering {
            id,
            item,
            destination,
            from,
            to,
        });
        id
    }

    /// Renderer finished an offering: deliver it into its inventory.
    ///
    /// Unknown or already-delivered ids are ignored.
    pub fn complete_offering(&mut self, id: OfferingId) -> Option<EnteringOffering> {
        let Some(index) = self.entering.iter().position(|o| o.id == id) else {
            warn!(offering = %id, "completion for unknown offering");
            return None;
        };
        let offering = self.entering.remove(index);
        self.deliver(&offering);
        Some(offering)
    }

    /// Deliver every in-flight offering at once, in launch order.
    pub fn flush_offerings(&mut self) -> Vec<EnteringOffering> {
        let flushed = std::mem::take(&mut self.entering);
        for offering in &flushed {
            self.deliver(offering);
        }
        if !flushed.is_empty() {
            debug!(count = flushed.len(), "offerings flushed");
        }
        flushed
    }

    fn deliver(&mut self, offering: &EnteringOffering) {
        self.inventories
            .entry(offering.destination.clone())
            .or_default()
            .push_back(offering.item.clone());
        self.recent_deliveries
            .insert(offering.destination.clone(), offering.item.clone());
    }

    #[must_use]
    pub fn entering(&self) -> &[EnteringOffering] {
        &self.entering
    }

    /// Offerings launched but not yet delivered.
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.entering.len()
    }

    // === Inventories ===

    /// Items delivered to `destination`, in delivery order.
    #[must_use]
    pub fn inventory(&self, destination: &DestinationId) -> Vector<Item> {
        self.inventories.get(destination).cloned().unwrap_or_default()
    }

    /// Items delivered across all destinations.
    #[must_use]
    pub fn delivered_count(&self) -> usize {
        self.inventories.values().map(Vector::len).sum()
    }

    /// Last item delivered to `destination` this round.
    #[must_use]
    pub fn recent_delivery(&self, destination: &DestinationId) -> Option<&Item> {
        self.recent_deliveries.get(destination)
    }

    // === Rounds ===

    /// Reset per-round presentation state when a new batch loads.
    ///
    /// Clears the pulse, the returning item and recent deliveries, and
    /// bumps the animation epoch. Offerings still in flight are kept so
    /// they can deliver.
    pub fn reset_round_effects(&mut self) {
        self.pulse.clear();
        self.returning.clear();
        self.recent_deliveries.clear();
        self.animation_epoch += 1;
    }

    /// Bumped on every batch load. Renderers key per-round destination
    /// animations off it.
    #[must_use]
    pub fn animation_epoch(&self) -> u64 {
        self.animation_epoch
    }
}
