//! Tick repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Receive upsert/delete intents produced by tick/untick gestures.
//! - Hand persisted records back when a track is registered.
//!
//! # Invariants
//! - `upsert_tick` validates the record before storing it.
//! - `delete_tick` on an absent record reports `NotFound` instead of
//!   masking the inconsistency.

use crate::model::tick::{Tick, TickValidationError};
use crate::model::track::TrackId;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for tick persistence intents.
#[derive(Debug)]
pub enum RepoError {
    Validation(TickValidationError),
    NotFound { track_id: TrackId, day_offset: i64 },
    /// Backend-specific failure surfaced by an external implementation.
    Storage(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound {
                track_id,
                day_offset,
            } => write!(f, "no tick for track {track_id} at day offset {day_offset}"),
            Self::Storage(message) => write!(f, "storage failure: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } | Self::Storage(_) => None,
        }
    }
}

impl From<TickValidationError> for RepoError {
    fn from(value: TickValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Intent-level persistence interface for tick records.
///
/// The engine calls these from mutation paths; implementations own
/// durability, batching and conflict reconciliation.
pub trait TickRepository {
    /// Loads every persisted tick for one track.
    fn load_ticks(&self, track_id: TrackId) -> RepoResult<Vec<Tick>>;

    /// Creates or replaces the record at `tick.day_offset`.
    fn upsert_tick(&mut self, track_id: TrackId, tick: &Tick) -> RepoResult<()>;

    /// Removes the record at `day_offset`.
    fn delete_tick(&mut self, track_id: TrackId, day_offset: i64) -> RepoResult<()>;
}

/// In-process repository used by tests and the CLI probe.
#[derive(Debug, Clone, Default)]
pub struct MemoryTickRepository {
    ticks: BTreeMap<TrackId, BTreeMap<i64, Tick>>,
}

impl MemoryTickRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds persisted state ahead of track registration.
    pub fn seed(&mut self, track_id: TrackId, records: Vec<Tick>) {
        let entry = self.ticks.entry(track_id).or_default();
        for tick in records {
            entry.insert(tick.day_offset, tick);
        }
    }

    /// Total stored records across all tracks.
    pub fn record_count(&self) -> usize {
        self.ticks.values().map(BTreeMap::len).sum()
    }
}

impl TickRepository for MemoryTickRepository {
    fn load_ticks(&self, track_id: TrackId) -> RepoResult<Vec<Tick>> {
        Ok(self
            .ticks
            .get(&track_id)
            .map(|records| records.values().copied().collect())
            .unwrap_or_default())
    }

    fn upsert_tick(&mut self, track_id: TrackId, tick: &Tick) -> RepoResult<()> {
        tick.validate()?;
        self.ticks
            .entry(track_id)
            .or_default()
            .insert(tick.day_offset, *tick);
        Ok(())
    }

    fn delete_tick(&mut self, track_id: TrackId, day_offset: i64) -> RepoResult<()> {
        let removed = self
            .ticks
            .get_mut(&track_id)
            .and_then(|records| records.remove(&day_offset));
        if removed.is_none() {
            return Err(RepoError::NotFound {
                track_id,
                day_offset,
            });
        }
        Ok(())
    }
}
