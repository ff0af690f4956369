//! Tick domain model.
//!
//! # Responsibility
//! - Define the per-day occurrence record mutated through the aggregator.
//! - Carry the `modified` stamp the external sync layer uses for
//!   last-writer-wins arbitration.
//!
//! # Invariants
//! - `day_offset >= 0`; future days never own a tick record.
//! - `count >= 1`; a day with zero occurrences has no record at all.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure for a tick record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickValidationError {
    /// `day_offset` is negative.
    NegativeDayOffset(i64),
    /// `count` is zero; absent days are represented by no record.
    ZeroCount,
}

impl Display for TickValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeDayOffset(offset) => {
                write!(f, "tick day offset {offset} cannot be negative")
            }
            Self::ZeroCount => write!(f, "tick count cannot be zero"),
        }
    }
}

impl Error for TickValidationError {}

/// One or more recorded occurrences of a habit on a specific logical day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    /// Logical day index; 0 = today at creation time, growing into the past.
    pub day_offset: i64,
    /// Occurrence count; meaningful above 1 only for multiple tracks.
    pub count: u32,
    /// Epoch milliseconds of the last mutation.
    pub modified: i64,
}

impl Tick {
    /// Creates a fresh single-occurrence tick.
    pub fn new(day_offset: i64, modified: i64) -> Self {
        Self {
            day_offset,
            count: 1,
            modified,
        }
    }

    /// Checks record-level invariants.
    ///
    /// # Errors
    /// - `NegativeDayOffset` when the day index is below zero.
    /// - `ZeroCount` when the record claims zero occurrences.
    pub fn validate(&self) -> Result<(), TickValidationError> {
        if self.day_offset < 0 {
            return Err(TickValidationError::NegativeDayOffset(self.day_offset));
        }
        if self.count == 0 {
            return Err(TickValidationError::ZeroCount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Tick, TickValidationError};

    #[test]
    fn new_tick_has_count_one() {
        let tick = Tick::new(3, 1_700_000_000_000);
        assert_eq!(tick.count, 1);
        assert!(tick.validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_day() {
        let tick = Tick {
            day_offset: -1,
            count: 1,
            modified: 0,
        };
        assert_eq!(
            tick.validate(),
            Err(TickValidationError::NegativeDayOffset(-1))
        );
    }

    #[test]
    fn validate_rejects_zero_count() {
        let tick = Tick {
            day_offset: 0,
            count: 0,
            modified: 0,
        };
        assert_eq!(tick.validate(), Err(TickValidationError::ZeroCount));
    }
}
