//! Logical-day calendar arithmetic.
//!
//! # Responsibility
//! - Map wall-clock instants onto the integer day-offset axis the grid
//!   renders (0 = today, growing into the past).
//! - Derive week-boundary flags for separator rendering.
//!
//! # Invariants
//! - The rollover shift is applied to both the reference instant and the
//!   queried instant before truncating to a calendar day; shifting only one
//!   side would put boundary instants off by one day.

pub mod day_offset;

pub use day_offset::{DayOffsetCalculator, DayOffsetError, WeekInset};
