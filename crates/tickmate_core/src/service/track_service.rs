//! Track use-case service.
//!
//! # Responsibility
//! - Register tracks and rebuild their aggregates from persisted state.
//! - Apply tap (tick) and long-press (untick) gestures against the current
//!   logical day and forward the resulting intents to the repository.
//! - Drive the CSV export over all registered tracks.
//!
//! # Invariants
//! - Ticks dated before a track's `start_date` are rejected for every track.
//! - A mutation reaches the repository only after the aggregate accepted it.
//! - Export column order follows track registration order.

use crate::aggregate::{TickAggregator, TickError, TickMutation};
use crate::calendar::{DayOffsetCalculator, DayOffsetError};
use crate::clock::Clock;
use crate::export::{write_matrix, ExportEntry, ExportError};
use crate::model::track::{Track, TrackId, TrackValidationError};
use crate::registry::{GroupId, RegistryError, TrackRegistry};
use crate::repo::{RepoError, TickRepository};
use chrono::NaiveDateTime;
use log::{debug, info};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;

/// Service-level failure for track use-cases.
#[derive(Debug)]
pub enum ServiceError {
    Track(TrackValidationError),
    Calendar(DayOffsetError),
    Tick(TickError),
    Registry(RegistryError),
    Repo(RepoError),
    Export(ExportError),
    /// Gesture addressed a day before the track existed.
    BeforeTrackStart {
        track_id: TrackId,
        day_offset: i64,
        start_offset: i64,
    },
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Track(err) => write!(f, "{err}"),
            Self::Calendar(err) => write!(f, "{err}"),
            Self::Tick(err) => write!(f, "{err}"),
            Self::Registry(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
            Self::BeforeTrackStart {
                track_id,
                day_offset,
                start_offset,
            } => write!(
                f,
                "day offset {day_offset} predates track {track_id} (start offset {start_offset})"
            ),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Track(err) => Some(err),
            Self::Calendar(err) => Some(err),
            Self::Tick(err) => Some(err),
            Self::Registry(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Export(err) => Some(err),
            Self::BeforeTrackStart { .. } => None,
        }
    }
}

impl From<TrackValidationError> for ServiceError {
    fn from(value: TrackValidationError) -> Self {
        Self::Track(value)
    }
}

impl From<DayOffsetError> for ServiceError {
    fn from(value: DayOffsetError) -> Self {
        Self::Calendar(value)
    }
}

impl From<TickError> for ServiceError {
    fn from(value: TickError) -> Self {
        Self::Tick(value)
    }
}

impl From<RegistryError> for ServiceError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ExportError> for ServiceError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

/// Gesture-level orchestration over all registered tracks.
///
/// Explicitly constructed and scoped by the host; there is no shared global
/// instance.
pub struct TrackService<R: TickRepository, C: Clock> {
    calculator: DayOffsetCalculator,
    registry: TrackRegistry,
    tracks: BTreeMap<TrackId, Track>,
    /// Registration order; drives export column order.
    order: Vec<TrackId>,
    repo: R,
    clock: C,
}

impl<R: TickRepository, C: Clock> TrackService<R, C> {
    pub fn new(calculator: DayOffsetCalculator, repo: R, clock: C) -> Self {
        Self {
            calculator,
            registry: TrackRegistry::new(),
            tracks: BTreeMap::new(),
            order: Vec::new(),
            repo,
            clock,
        }
    }

    pub fn calculator(&self) -> &DayOffsetCalculator {
        &self.calculator
    }

    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    /// Injected repository, e.g. for host-side save scheduling.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Registers a track and rebuilds its aggregate from persisted ticks.
    ///
    /// # Errors
    /// - Validation failures of the track record.
    /// - `Registry(DuplicateTrack)` when the id is already registered.
    /// - Repository failures while loading persisted ticks.
    pub fn register_track(&mut self, track: Track) -> Result<(), ServiceError> {
        track.validate()?;
        let records = self.repo.load_ticks(track.id)?;
        let loaded = records.len();
        let aggregator = TickAggregator::from_ticks(records);
        let kept = aggregator.len();
        self.registry.register(track.id, aggregator)?;
        self.order.push(track.id);
        info!(
            "event=track_registered module=service status=ok track={} loaded={loaded} kept={kept}",
            track.id
        );
        self.tracks.insert(track.id, track);
        Ok(())
    }

    /// Removes a track, its aggregate and its group memberships.
    ///
    /// Persisted ticks are left to the repository owner; deleting history is
    /// a destructive choice the engine does not make on its own.
    pub fn remove_track(&mut self, track_id: TrackId) -> Result<(), ServiceError> {
        self.registry.remove(track_id)?;
        self.tracks.remove(&track_id);
        self.order.retain(|id| *id != track_id);
        info!("event=track_removed module=service status=ok track={track_id}");
        Ok(())
    }

    /// Registered track record by id.
    pub fn track(&self, track_id: TrackId) -> Result<&Track, ServiceError> {
        self.tracks
            .get(&track_id)
            .ok_or(ServiceError::Registry(RegistryError::TrackNotFound(
                track_id,
            )))
    }

    /// Applies a tap gesture for the logical day owning `instant`.
    ///
    /// Forwards an upsert intent to the repository when the aggregate
    /// changed; a no-op tap produces no intent.
    pub fn tick_date(
        &mut self,
        track_id: TrackId,
        instant: NaiveDateTime,
    ) -> Result<TickMutation, ServiceError> {
        let now = self.clock.now();
        let stamp = self.clock.now_epoch_ms();
        let (day_offset, start_offset) = self.resolve_day(track_id, instant, now)?;

        let track = self
            .tracks
            .get(&track_id)
            .ok_or(ServiceError::Registry(RegistryError::TrackNotFound(
                track_id,
            )))?;
        let aggregator = self.registry.aggregator_mut(track_id)?;
        let mutation = aggregator.tick(track, day_offset, start_offset, stamp)?;

        match mutation {
            TickMutation::Created(tick) | TickMutation::Incremented(tick) => {
                self.repo.upsert_tick(track_id, &tick)?;
                info!(
                    "event=tick module=service status=ok track={track_id} day={day_offset} count={}",
                    tick.count
                );
            }
            TickMutation::Unchanged => {
                debug!(
                    "event=tick module=service status=noop track={track_id} day={day_offset}"
                );
            }
        }
        Ok(mutation)
    }

    /// Applies a tap gesture for the current logical day.
    pub fn tick_today(&mut self, track_id: TrackId) -> Result<TickMutation, ServiceError> {
        let now = self.clock.now();
        self.tick_date(track_id, now)
    }

    /// Applies a long-press (untick) gesture; returns whether anything
    /// changed. Forwards a delete intent when the record was removed, an
    /// upsert when it was only decremented.
    pub fn untick_date(
        &mut self,
        track_id: TrackId,
        instant: NaiveDateTime,
    ) -> Result<bool, ServiceError> {
        let now = self.clock.now();
        let stamp = self.clock.now_epoch_ms();
        let (day_offset, start_offset) = self.resolve_day(track_id, instant, now)?;

        let track = self
            .tracks
            .get(&track_id)
            .ok_or(ServiceError::Registry(RegistryError::TrackNotFound(
                track_id,
            )))?;
        let aggregator = self.registry.aggregator_mut(track_id)?;
        let changed = aggregator.untick(track, day_offset, start_offset, stamp)?;
        if !changed {
            debug!("event=untick module=service status=noop track={track_id} day={day_offset}");
            return Ok(false);
        }

        match self.registry.aggregator(track_id)?.get(day_offset) {
            Some(tick) => self.repo.upsert_tick(track_id, tick)?,
            None => self.repo.delete_tick(track_id, day_offset)?,
        }
        info!("event=untick module=service status=ok track={track_id} day={day_offset}");
        Ok(true)
    }

    /// Applies an untick gesture for the current logical day.
    pub fn untick_today(&mut self, track_id: TrackId) -> Result<bool, ServiceError> {
        let now = self.clock.now();
        self.untick_date(track_id, now)
    }

    /// Tick count for the logical day owning `instant`.
    pub fn tick_count_on(
        &self,
        track_id: TrackId,
        instant: NaiveDateTime,
    ) -> Result<u32, ServiceError> {
        let now = self.clock.now();
        let day_offset = self.calculator.offset_for_date(instant, now)?;
        Ok(self.registry.aggregator(track_id)?.tick_count(day_offset))
    }

    /// Tick count at an explicit day offset.
    pub fn tick_count_at(&self, track_id: TrackId, day_offset: i64) -> Result<u32, ServiceError> {
        Ok(self.registry.aggregator(track_id)?.tick_count(day_offset))
    }

    /// Earliest recorded day for a track, as a day offset.
    pub fn oldest_tick_day_offset(&self, track_id: TrackId) -> Result<Option<i64>, ServiceError> {
        Ok(self.registry.aggregator(track_id)?.oldest_tick_day_offset())
    }

    /// Adds a registered track to a group.
    pub fn assign_to_group(
        &mut self,
        group_id: GroupId,
        track_id: TrackId,
    ) -> Result<(), ServiceError> {
        self.registry.assign_to_group(group_id, track_id)?;
        Ok(())
    }

    /// Removes a track from a group; returns whether it was a member.
    pub fn remove_from_group(
        &mut self,
        group_id: GroupId,
        track_id: TrackId,
    ) -> Result<bool, ServiceError> {
        Ok(self.registry.remove_from_group(group_id, track_id)?)
    }

    /// Member track ids of a group.
    pub fn tracks_in_group(&self, group_id: GroupId) -> Result<Vec<TrackId>, ServiceError> {
        Ok(self.registry.tracks_in_group(group_id)?)
    }

    /// Writes the CSV matrix across all registered tracks.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<(), ServiceError> {
        let mut entries = Vec::with_capacity(self.order.len());
        for track_id in &self.order {
            let track = self
                .tracks
                .get(track_id)
                .ok_or(ServiceError::Registry(RegistryError::TrackNotFound(
                    *track_id,
                )))?;
            entries.push(ExportEntry {
                track,
                aggregator: self.registry.aggregator(*track_id)?,
            });
        }
        let now = self.clock.now();
        write_matrix(writer, &entries, &self.calculator, now)?;
        info!(
            "event=export module=service status=ok tracks={}",
            entries.len()
        );
        Ok(())
    }

    /// Maps an instant to a day offset and checks it against the track's
    /// start anchor. The start offset also bounds reversed-track mutation in
    /// the aggregate.
    fn resolve_day(
        &self,
        track_id: TrackId,
        instant: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Result<(i64, i64), ServiceError> {
        let track = self
            .tracks
            .get(&track_id)
            .ok_or(ServiceError::Registry(RegistryError::TrackNotFound(
                track_id,
            )))?;
        let day_offset = self.calculator.offset_for_date(instant, now)?;
        let start_offset = self
            .calculator
            .offset_for_calendar_day(track.start_date, now);
        if day_offset > start_offset {
            return Err(ServiceError::BeforeTrackStart {
                track_id,
                day_offset,
                start_offset,
            });
        }
        Ok((day_offset, start_offset))
    }
}
