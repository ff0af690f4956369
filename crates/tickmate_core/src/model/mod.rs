//! Domain model for tracks, ticks and colors.
//!
//! # Responsibility
//! - Define the canonical records exchanged with external collaborators.
//! - Keep per-record invariants checkable before any mutation intent leaves
//!   the engine.
//!
//! # Invariants
//! - Every track is identified by a stable `TrackId`.
//! - A tick's `day_offset` is never negative and its `count` is never zero.

pub mod color;
pub mod tick;
pub mod track;
