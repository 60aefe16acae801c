//! Round structure: partitioning the catalog and batching rounds.
//!
//! ## Key Types
//!
//! - `partition`: Catalog → equal-length shuffled per-destination queues
//! - `RoundBatcher`: Pops one item per destination into the tray each round
//! - `BatchStatus`: In progress / round complete / game complete

pub mod partition;
pub mod batcher;

pub use partition::{partition, DestinationQueue, Partition};
pub use batcher::{BatchLoad, BatchStatus, RoundBatcher};
