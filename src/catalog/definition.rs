//! Item and destination definitions.
//!
//! Both are immutable once loaded. Field names follow the engine's
//! vocabulary; serde aliases accept the names used by the game data file
//! (`correct_clan_id`, `color`, `icon`, `name_boe`).

use serde::{Deserialize, Serialize};

use crate::core::{DestinationId, ItemId};

/// Categorical tag grouping destinations (the clan moiety colour in the
/// game data). Used only for progress tallies and the default ring layout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Faction(pub String);

impl Faction {
    /// Create a new faction tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Borrow the raw tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Faction {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A matchable content unit.
///
/// ## Example
///
/// ```
/// use offering_engine::catalog::Item;
///
/// let anta = Item::new("item_anta_kie", "anta", "clan_kie")
///     .with_native_name("Ki")
///     .with_faction("#000000")
///     .with_media("🫎");
///
/// assert_eq!(anta.destination.as_str(), "clan_kie");
/// assert_eq!(anta.native_name, "Ki");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    pub id: ItemId,

    /// Display name.
    pub name: String,

    /// Name in the native language.
    #[serde(default, alias = "name_boe")]
    pub native_name: String,

    /// Icon or image reference. Opaque to the engine.
    #[serde(default, alias = "icon", alias = "image_path")]
    pub media: String,

    /// Faction tag.
    #[serde(default, alias = "color")]
    pub faction: Faction,

    /// The destination this item belongs to.
    #[serde(alias = "correct_clan_id")]
    pub destination: DestinationId,
}

impl Item {
    /// Create a new item with no native name, media or faction.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        destination: impl Into<DestinationId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            native_name: String::new(),
            media: String::new(),
            faction: Faction::default(),
            destination: destination.into(),
        }
    }

    /// Set the native-language name (builder pattern).
    #[must_use]
    pub fn with_native_name(mut self, name: impl Into<String>) -> Self {
        self.native_name = name.into();
        self
    }

    /// Set the media reference (builder pattern).
    #[must_use]
    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = media.into();
        self
    }

    /// Set the faction tag (builder pattern).
    #[must_use]
    pub fn with_faction(mut self, faction: impl Into<Faction>) -> Self {
        self.faction = faction.into();
        self
    }

    /// True if this item belongs to `destination`.
    #[must_use]
    pub fn belongs_to(&self, destination: &DestinationId) -> bool {
        &self.destination == destination
    }
}

/// A match target (a clan in the game data).
///
/// Anchor positions are not stored here; the layout collaborator supplies
/// them per call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Unique identifier.
    pub id: DestinationId,

    /// Display name.
    pub name: String,

    /// Name in the native language.
    #[serde(default, alias = "name_boe")]
    pub native_name: String,
}

impl Destination {
    /// Create a new destination.
    pub fn new(id: impl Into<DestinationId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            native_name: String::new(),
        }
    }

    /// Set the native-language name (builder pattern).
    #[must_use]
    pub fn with_native_name(mut self, name: impl Into<String>) -> Self {
        self.native_name = name.into();
        self
    }
}
