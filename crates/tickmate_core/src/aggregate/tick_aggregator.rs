//! Tick aggregator for one track.
//!
//! # Responsibility
//! - Aggregate tick records by day offset and answer per-day counts.
//! - Apply tick/untick gestures with create/increment/decrement/delete
//!   semantics and stamp `modified` on every change.
//!
//! # Invariants
//! - Absent key means zero ticks; no record ever carries `count == 0`.
//! - `tick` on a non-multiple track with an existing record is a no-op;
//!   toggling off is exclusively `untick`'s job.
//! - Reversed tracks reject mutations for days beyond the caller-supplied
//!   today offset.

use crate::model::tick::Tick;
use crate::model::track::Track;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Mutation rejection. Local-recoverable; the UI drops the gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickError {
    /// Day offset is negative or, for a reversed track, beyond today.
    InvalidDay { day_offset: i64, today_offset: i64 },
}

impl Display for TickError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDay {
                day_offset,
                today_offset,
            } => write!(
                f,
                "day offset {day_offset} is not mutable (today offset {today_offset})"
            ),
        }
    }
}

impl Error for TickError {}

/// What a `tick` gesture did to the aggregate.
///
/// Created/incremented variants carry the resulting record so the caller can
/// forward an upsert intent to its persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickMutation {
    /// First tick of the day; record created with count 1.
    Created(Tick),
    /// Multiple track; count incremented.
    Incremented(Tick),
    /// Non-multiple track already ticked; nothing changed.
    Unchanged,
}

/// Sparse per-day tick store for a single track.
///
/// Not shared across threads; the owning caller serializes access.
#[derive(Debug, Clone, Default)]
pub struct TickAggregator {
    ticks: BTreeMap<i64, Tick>,
}

impl TickAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an aggregate from externally persisted records.
    ///
    /// Enforces the one-record-per-day invariant the external store does not:
    /// duplicate day offsets resolve to the record with the newest `modified`
    /// stamp, matching the sync layer's last-writer-wins policy. Records that
    /// fail validation are skipped.
    pub fn from_ticks<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Tick>,
    {
        let mut ticks: BTreeMap<i64, Tick> = BTreeMap::new();
        for tick in records {
            if tick.validate().is_err() {
                continue;
            }
            match ticks.get(&tick.day_offset) {
                Some(existing) if existing.modified >= tick.modified => {}
                _ => {
                    ticks.insert(tick.day_offset, tick);
                }
            }
        }
        Self { ticks }
    }

    /// Tick count at `day_offset`; 0 when the day is untouched.
    pub fn tick_count(&self, day_offset: i64) -> u32 {
        self.ticks.get(&day_offset).map_or(0, |tick| tick.count)
    }

    /// Record at `day_offset`, if any.
    pub fn get(&self, day_offset: i64) -> Option<&Tick> {
        self.ticks.get(&day_offset)
    }

    /// Applies a tap gesture.
    ///
    /// - Absent day: creates a count-1 record.
    /// - Multiple track: increments, saturating at `u32::MAX`.
    /// - Non-multiple track with an existing record: no-op.
    ///
    /// `modified_at` (epoch milliseconds) is stamped on every change.
    ///
    /// # Errors
    /// - `InvalidDay` when `day_offset < 0`, or when the track is reversed
    ///   and `day_offset > today_offset`.
    pub fn tick(
        &mut self,
        track: &Track,
        day_offset: i64,
        today_offset: i64,
        modified_at: i64,
    ) -> Result<TickMutation, TickError> {
        self.check_day(track, day_offset, today_offset)?;

        match self.ticks.entry(day_offset) {
            Entry::Vacant(slot) => {
                let tick = Tick::new(day_offset, modified_at);
                slot.insert(tick);
                Ok(TickMutation::Created(tick))
            }
            Entry::Occupied(mut slot) if track.multiple => {
                let tick = slot.get_mut();
                // Saturate instead of overflowing; mutation stays total.
                tick.count = tick.count.saturating_add(1);
                tick.modified = modified_at;
                Ok(TickMutation::Incremented(*tick))
            }
            Entry::Occupied(_) => Ok(TickMutation::Unchanged),
        }
    }

    /// Applies an untick gesture; returns whether anything changed.
    ///
    /// - Absent day: no-op, `false`.
    /// - Count above 1: decrement, stamp `modified`, `true`.
    /// - Count 1: delete the record, `true`.
    ///
    /// # Errors
    /// Same day validation as `tick`; no future unticking on reversed tracks.
    pub fn untick(
        &mut self,
        track: &Track,
        day_offset: i64,
        today_offset: i64,
        modified_at: i64,
    ) -> Result<bool, TickError> {
        self.check_day(track, day_offset, today_offset)?;

        match self.ticks.entry(day_offset) {
            Entry::Vacant(_) => Ok(false),
            Entry::Occupied(mut slot) if slot.get().count > 1 => {
                let tick = slot.get_mut();
                tick.count -= 1;
                tick.modified = modified_at;
                Ok(true)
            }
            Entry::Occupied(slot) => {
                slot.remove();
                Ok(true)
            }
        }
    }

    /// Maximum present day offset, i.e. the earliest calendar day with any
    /// recorded activity. Bounds export ranges.
    pub fn oldest_tick_day_offset(&self) -> Option<i64> {
        self.ticks.keys().next_back().copied()
    }

    /// Records in ascending day-offset order.
    pub fn ticks(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.values()
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    fn check_day(
        &self,
        track: &Track,
        day_offset: i64,
        today_offset: i64,
    ) -> Result<(), TickError> {
        if day_offset < 0 || (track.reversed && day_offset > today_offset) {
            return Err(TickError::InvalidDay {
                day_offset,
                today_offset,
            });
        }
        Ok(())
    }
}
