//! Transient visual-effect intents.
//!
//! The coordinator holds the intents a renderer draws and the inventories
//! that fill as offerings arrive. Renderers acknowledge each intent through
//! a completion call; the engine keeps no timers.
//!
//! ## Key Types
//!
//! - `IntentSlot`: At most one active value, replace-on-request
//! - `FeedbackPulse`, `ReturningItem`, `EnteringOffering`: The intents
//! - `EffectCoordinator`: Owns intents, inventories and recent deliveries

mod coordinator;
mod intents;

pub use coordinator::EffectCoordinator;
pub use intents::{EnteringOffering, FeedbackPulse, IntentSlot, PulseKind, ReturningItem};
