//! Use-case services orchestrating calendar, aggregation and persistence.
//!
//! # Responsibility
//! - Provide stable gesture-level entry points for host callers.
//! - Translate instants into day offsets and forward persistence intents.
//!
//! # Invariants
//! - Services never bypass aggregator validation or repository contracts.
//! - All collaborators (clock, repository) are dependency-injected.

pub mod track_service;

pub use track_service::{ServiceError, TrackService};
