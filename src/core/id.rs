//! Identifiers for catalog entries and in-flight offerings.
//!
//! Items and destinations keep the string ids they were authored with in
//! the game data file, wrapped in newtypes so the two can never be mixed
//! up. Offerings are engine-allocated and numeric.
//!
//! ```
//! use offering_engine::core::{DestinationId, ItemId};
//!
//! let item = ItemId::new("item_anta_kie");
//! let clan: DestinationId = "clan_kie".into();
//!
//! assert_eq!(item.as_str(), "item_anta_kie");
//! assert_eq!(format!("{}", clan), "clan_kie");
//! ```

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new id.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw id.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True if the id is empty or whitespace.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id! {
    /// Unique identifier of a matchable item.
    ItemId
}

string_id! {
    /// Unique identifier of a destination (a clan in the game data).
    DestinationId
}

/// Identifier of an in-flight offering animation.
///
/// Allocated by the effect coordinator, monotonically increasing within a
/// session, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OfferingId(pub u64);

impl OfferingId {
    /// Create a new offering ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OfferingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Offering({})", self.0)
    }
}
