//! Session phase and drop outcome.

use serde::{Deserialize, Serialize};

use crate::core::{DestinationId, ItemId, OfferingId};

/// Lifecycle phase of a session.
///
/// ```text
/// Ready ──(tray empties, rounds remain)──▶ RoundTransition
///   ▲                                           │
///   └──────────────(advance_round)──────────────┘
/// Ready ──(tray empties, queues exhausted)──▶ Complete
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// A batch is in the tray and drops are accepted.
    Ready,
    /// The tray emptied; waiting for `advance_round`.
    RoundTransition,
    /// Terminal. No further drops are accepted.
    Complete,
}

/// Result of a drop on a pending drag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// The item resolved to its own destination and is on its way there.
    Correct {
        item: ItemId,
        destination: DestinationId,
        offering: OfferingId,
        points: u64,
    },
    /// Wrong destination, or no destination within the snap tolerance.
    /// The item stays in the tray.
    Incorrect {
        item: ItemId,
        resolved: Option<DestinationId>,
    },
}

impl MatchOutcome {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, MatchOutcome::Correct { .. })
    }

    /// The dropped item.
    #[must_use]
    pub fn item(&self) -> &ItemId {
        match self {
            MatchOutcome::Correct { item, .. } | MatchOutcome::Incorrect { item, .. } => item,
        }
    }
}
