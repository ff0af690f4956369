//! Track domain model.
//!
//! # Responsibility
//! - Define the per-habit configuration record consumed by the engine.
//! - Validate configuration before it reaches aggregation or display code.
//!
//! # Invariants
//! - `id` is stable and never reused for another track.
//! - `color` is a packed RGB value without alpha (`<= 0xFF_FFFF`).
//! - Ticks dated before `start_date` are invalid for this track.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a track.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TrackId = Uuid;

/// Largest packed RGB value a track color may carry (no alpha byte).
pub const MAX_TRACK_COLOR: u32 = 0x00FF_FFFF;

/// Validation failure for a track record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackValidationError {
    /// Track name is empty or whitespace-only.
    EmptyName,
    /// Color carries bits above the 24-bit RGB range.
    ColorOutOfRange(u32),
}

impl Display for TrackValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "track name cannot be empty"),
            Self::ColorOutOfRange(value) => {
                write!(f, "track color {value:#010x} exceeds 24-bit RGB range")
            }
        }
    }
}

impl Error for TrackValidationError {}

/// Per-habit configuration record.
///
/// Owned by the external configuration collaborator; the engine reads it to
/// decide mutation and display semantics, never to persist it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Stable global ID used for registry lookup and sync mapping.
    pub id: TrackId,
    /// Display name of the habit.
    pub name: String,
    /// Calendar anchor; ticks before this day are rejected.
    pub start_date: NaiveDate,
    /// Whether one day may accumulate more than one tick.
    pub multiple: bool,
    /// Whether absence of a tick is the positive state.
    pub reversed: bool,
    /// Packed RGB color, no alpha.
    pub color: u32,
}

impl Track {
    /// Creates a track with a generated stable ID and default flags.
    pub fn new(name: impl Into<String>, start_date: NaiveDate) -> Self {
        Self::with_id(Uuid::new_v4(), name, start_date)
    }

    /// Creates a track with a caller-provided stable ID.
    ///
    /// Used by import/sync paths where identity already exists externally.
    pub fn with_id(id: TrackId, name: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            start_date,
            multiple: false,
            reversed: false,
            color: 0,
        }
    }

    /// Checks record-level invariants.
    ///
    /// # Errors
    /// - `EmptyName` when the name has no visible characters.
    /// - `ColorOutOfRange` when `color` uses more than 24 bits.
    pub fn validate(&self) -> Result<(), TrackValidationError> {
        if self.name.trim().is_empty() {
            return Err(TrackValidationError::EmptyName);
        }
        if self.color > MAX_TRACK_COLOR {
            return Err(TrackValidationError::ColorOutOfRange(self.color));
        }
        Ok(())
    }
}
