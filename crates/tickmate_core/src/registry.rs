//! Track and group registry.
//!
//! # Responsibility
//! - Own the `TrackId -> TickAggregator` mapping for all registered tracks.
//! - Own group membership as explicit `GroupId -> TrackId` sets instead of a
//!   bidirectional object graph.
//!
//! # Invariants
//! - Each track id owns exactly one aggregator.
//! - Removing a track also removes it from every group.
//! - Iteration order is deterministic (ordered maps throughout).

use crate::aggregate::TickAggregator;
use crate::model::track::TrackId;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a track group.
pub type GroupId = Uuid;

/// Registry lookup/registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateTrack(TrackId),
    TrackNotFound(TrackId),
    GroupNotFound(GroupId),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateTrack(id) => write!(f, "track already registered: {id}"),
            Self::TrackNotFound(id) => write!(f, "track not found: {id}"),
            Self::GroupNotFound(id) => write!(f, "group not found: {id}"),
        }
    }
}

impl Error for RegistryError {}

/// Explicit owned collections replacing implicit object-graph relationships.
#[derive(Debug, Clone, Default)]
pub struct TrackRegistry {
    aggregators: BTreeMap<TrackId, TickAggregator>,
    groups: BTreeMap<GroupId, BTreeSet<TrackId>>,
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one track with its (possibly rebuilt) aggregator.
    ///
    /// # Errors
    /// - `DuplicateTrack` when the id is already registered.
    pub fn register(
        &mut self,
        track_id: TrackId,
        aggregator: TickAggregator,
    ) -> Result<(), RegistryError> {
        if self.aggregators.contains_key(&track_id) {
            return Err(RegistryError::DuplicateTrack(track_id));
        }
        self.aggregators.insert(track_id, aggregator);
        Ok(())
    }

    /// Removes a track and purges it from all group memberships.
    ///
    /// # Errors
    /// - `TrackNotFound` when the id is not registered.
    pub fn remove(&mut self, track_id: TrackId) -> Result<TickAggregator, RegistryError> {
        let aggregator = self
            .aggregators
            .remove(&track_id)
            .ok_or(RegistryError::TrackNotFound(track_id))?;
        for members in self.groups.values_mut() {
            members.remove(&track_id);
        }
        Ok(aggregator)
    }

    pub fn aggregator(&self, track_id: TrackId) -> Result<&TickAggregator, RegistryError> {
        self.aggregators
            .get(&track_id)
            .ok_or(RegistryError::TrackNotFound(track_id))
    }

    pub fn aggregator_mut(
        &mut self,
        track_id: TrackId,
    ) -> Result<&mut TickAggregator, RegistryError> {
        self.aggregators
            .get_mut(&track_id)
            .ok_or(RegistryError::TrackNotFound(track_id))
    }

    pub fn contains(&self, track_id: TrackId) -> bool {
        self.aggregators.contains_key(&track_id)
    }

    pub fn len(&self) -> usize {
        self.aggregators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aggregators.is_empty()
    }

    /// Registered track ids in stable order.
    pub fn track_ids(&self) -> Vec<TrackId> {
        self.aggregators.keys().copied().collect()
    }

    /// Adds a track to a group, creating the group on first use.
    ///
    /// # Errors
    /// - `TrackNotFound` when the track is not registered.
    pub fn assign_to_group(
        &mut self,
        group_id: GroupId,
        track_id: TrackId,
    ) -> Result<(), RegistryError> {
        if !self.aggregators.contains_key(&track_id) {
            return Err(RegistryError::TrackNotFound(track_id));
        }
        self.groups.entry(group_id).or_default().insert(track_id);
        Ok(())
    }

    /// Removes a track from a group; returns whether it was a member.
    ///
    /// # Errors
    /// - `GroupNotFound` when the group does not exist.
    pub fn remove_from_group(
        &mut self,
        group_id: GroupId,
        track_id: TrackId,
    ) -> Result<bool, RegistryError> {
        let members = self
            .groups
            .get_mut(&group_id)
            .ok_or(RegistryError::GroupNotFound(group_id))?;
        Ok(members.remove(&track_id))
    }

    /// Member track ids of a group in stable order.
    ///
    /// # Errors
    /// - `GroupNotFound` when the group does not exist.
    pub fn tracks_in_group(&self, group_id: GroupId) -> Result<Vec<TrackId>, RegistryError> {
        self.groups
            .get(&group_id)
            .map(|members| members.iter().copied().collect())
            .ok_or(RegistryError::GroupNotFound(group_id))
    }

    /// Known group ids in stable order.
    pub fn group_ids(&self) -> Vec<GroupId> {
        self.groups.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{RegistryError, TrackRegistry};
    use crate::aggregate::TickAggregator;
    use uuid::Uuid;

    #[test]
    fn register_rejects_duplicate_ids() {
        let mut registry = TrackRegistry::new();
        let id = Uuid::new_v4();
        registry.register(id, TickAggregator::new()).unwrap();
        assert_eq!(
            registry.register(id, TickAggregator::new()),
            Err(RegistryError::DuplicateTrack(id))
        );
    }

    #[test]
    fn remove_purges_group_membership() {
        let mut registry = TrackRegistry::new();
        let track = Uuid::new_v4();
        let group = Uuid::new_v4();
        registry.register(track, TickAggregator::new()).unwrap();
        registry.assign_to_group(group, track).unwrap();
        assert_eq!(registry.tracks_in_group(group).unwrap(), vec![track]);

        registry.remove(track).unwrap();
        assert!(registry.tracks_in_group(group).unwrap().is_empty());
        assert_eq!(
            registry.aggregator(track).unwrap_err(),
            RegistryError::TrackNotFound(track)
        );
    }

    #[test]
    fn group_assignment_requires_registered_track() {
        let mut registry = TrackRegistry::new();
        let track = Uuid::new_v4();
        let group = Uuid::new_v4();
        assert_eq!(
            registry.assign_to_group(group, track),
            Err(RegistryError::TrackNotFound(track))
        );
        assert_eq!(
            registry.tracks_in_group(group),
            Err(RegistryError::GroupNotFound(group))
        );
    }
}
