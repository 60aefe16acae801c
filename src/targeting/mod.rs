//! Target resolution and the default anchor layout.
//!
//! - `resolve_drop`: Drop point → destination, within the snap tolerance
//! - `ring_anchors` / `stage_geometry`: Default anchor placement for shells
//!   that do not lay destinations out themselves

pub mod resolver;
pub mod layout;

pub use resolver::{nearest_anchor, resolve_drop, Resolution};
pub use layout::{ring_anchors, stage_geometry};
