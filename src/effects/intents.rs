//! Transient animation intents.
//!
//! Intents are plain data a renderer picks up from the snapshot and
//! acknowledges through a completion callback. Positions are stage-local.

use serde::{Deserialize, Serialize};

use crate::catalog::Item;
use crate::core::{DestinationId, OfferingId, Point};

/// A single-slot intent: at most one active value.
///
/// A new request replaces the active value instead of queueing behind it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum IntentSlot<T> {
    Idle,
    Active(T),
}

impl<T> Default for IntentSlot<T> {
    fn default() -> Self {
        IntentSlot::Idle
    }
}

impl<T> IntentSlot<T> {
    /// Activate `intent`, returning the superseded one if any.
    pub fn replace(&mut self, intent: T) -> Option<T> {
        match std::mem::replace(self, IntentSlot::Active(intent)) {
            IntentSlot::Active(previous) => Some(previous),
            IntentSlot::Idle => None,
        }
    }

    /// Return to idle, yielding the active intent if any.
    pub fn clear(&mut self) -> Option<T> {
        match std::mem::take(self) {
            IntentSlot::Active(intent) => Some(intent),
            IntentSlot::Idle => None,
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<&T> {
        match self {
            IntentSlot::Active(intent) => Some(intent),
            IntentSlot::Idle => None,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, IntentSlot::Active(_))
    }
}

/// Correctness tag of a feedback pulse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PulseKind {
    Correct,
    Incorrect,
}

/// A one-shot visual ping.
///
/// `key` is fresh for every pulse so a renderer can restart its animation
/// when a pulse supersedes another at the same position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackPulse {
    pub position: Point,
    pub kind: PulseKind,
    pub key: u64,
}

/// An incorrectly dropped item animating back to its tray slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReturningItem {
    pub item: Item,
    /// Drop point.
    pub from: Point,
    /// Centre of the tray slot the drag started from.
    pub to: Point,
}

/// A correctly matched item travelling to its destination.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnteringOffering {
    pub id: OfferingId,
    pub item: Item,
    pub destination: DestinationId,
    /// Drop point.
    pub from: Point,
    /// Destination anchor.
    pub to: Point,
}
