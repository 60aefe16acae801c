//! Session events.
//!
//! Events are facts the shell reacts to: lifecycle transitions it must act
//! on (load the next round after its presentation delay, show the end
//! screen) and cosmetic cues it may animate. They are queued by the
//! session and drained once per tick; none of them feed back into scoring.

use serde::{Deserialize, Serialize};

use crate::core::{DestinationId, ItemId, OfferingId};

/// Something that happened during a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A new batch is in the tray. Per-round presentation state (spotlight,
    /// recent deliveries, destination animations) has been reset.
    BatchLoaded { round: usize, size: usize },

    /// The tray emptied and more rounds remain. The shell should call
    /// `advance_round` after its presentation delay.
    RoundComplete { round: usize },

    /// The last item of the last round was matched. Terminal.
    GameComplete,

    /// An offering finished arriving and joined its destination's inventory.
    OfferingDelivered {
        offering: OfferingId,
        item: ItemId,
        destination: DestinationId,
    },

    /// The streak went from 0 to 1.
    StreakStarted,

    /// A reward milestone was reached.
    RewardEarned { streak: u32, total: u32 },

    /// A streak longer than the encouragement threshold was just lost.
    Encouragement { lost_streak: u32 },
}

impl SessionEvent {
    /// True for purely cosmetic cues the shell may ignore.
    #[must_use]
    pub fn is_cosmetic(&self) -> bool {
        matches!(
            self,
            SessionEvent::StreakStarted
                | SessionEvent::RewardEarned { .. }
                | SessionEvent::Encouragement { .. }
        )
    }
}
