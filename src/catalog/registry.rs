//! Validated collection of destinations and items.
//!
//! The `Catalog` is the full content set a session is built from. It
//! guarantees unique, non-blank ids; it does not require every item to
//! point at a known destination (partitioning skips those).
//!
//! `Catalog::new` rejects duplicate ids. The generated game data repeats
//! some item ids within a clan, so `Catalog::from_json` keeps the first
//! entry for each id and skips the rest with a warning.

use std::fmt::Display;
use std::hash::Hash;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::definition::{Destination, Faction, Item};
use crate::core::{DestinationId, ItemId};
use crate::error::CatalogError;

/// Full content set: destinations plus the items that belong to them.
///
/// ## Example
///
/// ```
/// use offering_engine::catalog::Catalog;
///
/// let json = r##"{
///     "clans": [{"id": "clan_kie", "name": "KIE"}],
///     "items": [{"id": "item_anta", "name": "anta", "correct_clan_id": "clan_kie", "color": "#000000"}]
/// }"##;
///
/// let catalog = Catalog::from_json(json).unwrap();
/// assert_eq!(catalog.destinations().len(), 1);
/// assert_eq!(catalog.items().len(), 1);
/// ```
#[derive(Clone, Debug, Default, Serialize)]
pub struct Catalog {
    destinations: Vec<Destination>,
    items: Vec<Item>,
}

#[derive(Deserialize)]
struct RawCatalog {
    #[serde(alias = "clans")]
    destinations: Vec<Destination>,
    items: Vec<Item>,
}

impl Catalog {
    /// Build a catalog, validating ids.
    pub fn new(destinations: Vec<Destination>, items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut seen_destinations = FxHashSet::default();
        for destination in &destinations {
            if destination.id.is_blank() {
                return Err(CatalogError::BlankId);
            }
            if !seen_destinations.insert(&destination.id) {
                return Err(CatalogError::DuplicateDestination(destination.id.clone()));
            }
        }

        let mut seen_items = FxHashSet::default();
        for item in &items {
            if item.id.is_blank() || item.destination.is_blank() {
                return Err(CatalogError::BlankId);
            }
            if !seen_items.insert(&item.id) {
                return Err(CatalogError::DuplicateItem(item.id.clone()));
            }
        }

        Ok(Self {
            destinations,
            items,
        })
    }

    /// Parse and validate a catalog from the game data JSON.
    ///
    /// Later entries that repeat an id are skipped; blank ids still fail.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Self::new(
            first_by_id(raw.destinations, |d| d.id.clone()),
            first_by_id(raw.items, |i| i.id.clone()),
        )
    }

    /// All destinations, in authored order.
    #[must_use]
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// All items, in authored order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Look up a destination.
    #[must_use]
    pub fn destination(&self, id: &DestinationId) -> Option<&Destination> {
        self.destinations.iter().find(|d| &d.id == id)
    }

    /// Look up an item.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Items belonging to a destination.
    pub fn items_for<'a>(&'a self, id: &'a DestinationId) -> impl Iterator<Item = &'a Item> + 'a {
        self.items.iter().filter(move |i| i.belongs_to(id))
    }

    /// Faction of a destination: the faction of the first item that
    /// belongs to it. `None` for destinations with no items.
    #[must_use]
    pub fn faction_of(&self, id: &DestinationId) -> Option<&Faction> {
        self.items.iter().find(|i| i.belongs_to(id)).map(|i| &i.faction)
    }

    /// Distinct factions, in order of first appearance among items.
    #[must_use]
    pub fn factions(&self) -> Vec<Faction> {
        let mut factions: Vec<Faction> = Vec::new();
        for item in &self.items {
            if !factions.contains(&item.faction) {
                factions.push(item.faction.clone());
            }
        }
        factions
    }

    /// Consume the catalog into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Destination>, Vec<Item>) {
        (self.destinations, self.items)
    }
}

/// Keep the first entry for each id.
fn first_by_id<T, K>(entries: Vec<T>, id: impl Fn(&T) -> K) -> Vec<T>
where
    K: Eq + Hash + Display,
{
    let mut seen = FxHashSet::default();
    entries
        .into_iter()
        .filter(|entry| {
            let key = id(entry);
            if seen.contains(&key) {
                warn!(id = %key, "duplicate catalog id; later entry skipped");
                false
            } else {
                seen.insert(key);
                true
            }
        })
        .collect()
}
