//! Error types.
//!
//! Only two things can fail: loading a catalog, and starting a session
//! with nothing to play. Wrong drops, stale callbacks and drops without a
//! drag are ordinary game events and never surface here.

use thiserror::Error;

use crate::core::{DestinationId, ItemId};

/// Failure to start a session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No destination has any matching supply, or the round cap is zero.
    #[error("no playable rounds: {destinations} destination(s) with supply, round cap {cap_rounds}")]
    NoPlayableRounds {
        destinations: usize,
        cap_rounds: usize,
    },
}

/// Failure to load or validate a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed catalog data")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate item id {0}")]
    DuplicateItem(ItemId),

    #[error("duplicate destination id {0}")]
    DuplicateDestination(DestinationId),

    #[error("catalog entry with a blank id")]
    BlankId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SessionError::NoPlayableRounds {
            destinations: 0,
            cap_rounds: 5,
        };
        assert_eq!(
            err.to_string(),
            "no playable rounds: 0 destination(s) with supply, round cap 5"
        );

        let err = CatalogError::DuplicateItem(ItemId::new("item_paca_kie"));
        assert_eq!(err.to_string(), "duplicate item id item_paca_kie");
    }

    #[test]
    fn test_parse_error_source() {
        use std::error::Error as _;

        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CatalogError::from(parse);
        assert!(err.source().is_some());
    }
}
