//! Session lifecycle.
//!
//! ## Key Types
//!
//! - `Session`: The aggregate root; every mutation goes through it
//! - `SessionPhase`: `Ready`, `RoundTransition`, `Complete`
//! - `MatchOutcome`: Result of a drop
//! - `SessionSnapshot`: Owned per-tick view for renderers

mod outcome;
#[allow(clippy::module_inception)]
mod session;
mod snapshot;

pub use outcome::{MatchOutcome, SessionPhase};
pub use session::Session;
pub use snapshot::{DestinationInventory, SessionSnapshot};
