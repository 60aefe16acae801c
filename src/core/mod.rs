//! Core engine types: identifiers, geometry, configuration, RNG.
//!
//! Nothing in here knows about rounds or scoring; the other modules build
//! on these.

pub mod id;
pub mod geometry;
pub mod config;
pub mod rng;

pub use id::{DestinationId, ItemId, OfferingId};
pub use geometry::{Anchor, Point, Rect, StageGeometry, StageLayout};
pub use config::{LayoutConfig, SessionConfig, DEFAULT_CAP_ROUNDS};
pub use rng::GameRng;
