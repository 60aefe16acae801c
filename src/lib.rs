//! # offering-engine
//!
//! Session engine for a drag-and-drop matching game: players drag offering
//! tokens from a tray onto the destination (clan) each item belongs to.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: The engine never renders, tweens or reads
//!    window state. Geometry arrives as an explicit `StageGeometry` on every
//!    call that needs it.
//!
//! 2. **Callback-Driven Intents**: Pulses, returning items and offerings
//!    are plain data. Renderers acknowledge them through completion calls;
//!    the engine keeps no timers.
//!
//! 3. **Single Aggregate**: All mutation goes through `Session`. Renderers
//!    read an owned `SessionSnapshot` each tick.
//!
//! ## Modules
//!
//! - `core`: IDs, geometry, configuration, RNG
//! - `catalog`: Items, destinations, JSON loading
//! - `rounds`: Partitioning and round batching
//! - `targeting`: Drop resolution and default ring layout
//! - `scoring`: Score, streaks, rewards, faction progress
//! - `effects`: Transient intents and inventories
//! - `events`: Lifecycle facts and cosmetic cues
//! - `session`: Lifecycle orchestration

pub mod core;
pub mod catalog;
pub mod rounds;
pub mod targeting;
pub mod scoring;
pub mod effects;
pub mod events;
pub mod session;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    DestinationId, ItemId, OfferingId,
    Anchor, Point, Rect, StageGeometry, StageLayout,
    LayoutConfig, SessionConfig, DEFAULT_CAP_ROUNDS,
    GameRng,
};

pub use crate::catalog::{Catalog, Destination, Faction, Item};

pub use crate::rounds::{partition, BatchLoad, BatchStatus, Partition, RoundBatcher};

pub use crate::targeting::{resolve_drop, ring_anchors, stage_geometry, Resolution};

pub use crate::scoring::{FactionProgress, ScoreTracker};

pub use crate::effects::{
    EffectCoordinator, EnteringOffering, FeedbackPulse, IntentSlot, PulseKind, ReturningItem,
};

pub use crate::events::SessionEvent;

pub use crate::session::{
    DestinationInventory, MatchOutcome, Session, SessionPhase, SessionSnapshot,
};

pub use crate::error::{CatalogError, SessionError};
