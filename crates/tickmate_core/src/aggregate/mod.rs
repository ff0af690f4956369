//! Per-track tick aggregation.
//!
//! # Responsibility
//! - Maintain the sparse `day_offset -> Tick` mapping for one track.
//! - Expose idempotent tick/untick mutation with saturating semantics.
//!
//! # Invariants
//! - At most one tick record exists per day offset.
//! - A single tap never removes a count-1 entry; removal is only `untick`.

pub mod tick_aggregator;

pub use tick_aggregator::{TickAggregator, TickError, TickMutation};
