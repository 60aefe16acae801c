//! Content catalog: items, destinations and factions.
//!
//! ## Key Types
//!
//! - `Item`: A matchable unit with its correct destination
//! - `Destination`: A match target
//! - `Faction`: Categorical tag used for progress tallies
//! - `Catalog`: Validated collection, loadable from the game data JSON

pub mod definition;
pub mod registry;

pub use definition::{Destination, Faction, Item};
pub use registry::Catalog;
