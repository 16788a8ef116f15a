//! World state management - the point-in-time snapshot the narrative side reads.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::entities::{Actor, StatChanges, StationStat, StationStatMap};
use crate::ids::{EntityId, LocationId};

/// Station stats never drop below this level.
pub const STATION_STAT_FLOOR: i32 = 1;

/// A named place where scenes happen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
}

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: LocationId::new(),
            name: name.into(),
        }
    }
}

/// The complete state of the game world at any point in time.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorldState {
    /// All actors, ordered by id so scans are deterministic.
    pub actors: BTreeMap<EntityId, Actor>,

    /// Location data.
    pub locations: HashMap<LocationId, Location>,

    /// Current location of each actor.
    pub actor_locations: HashMap<EntityId, LocationId>,

    /// Station stat levels. `None` until the station has been set up.
    pub station_stats: Option<StationStatMap>,
}

impl WorldState {
    /// Create a new empty world state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get actor by ID.
    pub fn get_actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Get mutable actor by ID.
    pub fn get_actor_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Add an actor to the world.
    pub fn add_actor(&mut self, actor: Actor) -> EntityId {
        let id = actor.id;
        self.actors.insert(id, actor);
        id
    }

    /// Add a location to the world.
    pub fn add_location(&mut self, location: Location) -> LocationId {
        let id = location.id;
        self.locations.insert(id, location);
        id
    }

    /// Set actor location.
    pub fn set_actor_location(&mut self, actor_id: EntityId, location_id: LocationId) {
        self.actor_locations.insert(actor_id, location_id);
    }

    /// Find a location by name, ignoring case.
    pub fn location_by_name(&self, name: &str) -> Option<&Location> {
        let name = name.trim();
        self.locations
            .values()
            .find(|loc| loc.name.eq_ignore_ascii_case(name))
    }

    /// Actors physically present at a location, in id order. Remote actors
    /// are never present anywhere.
    pub fn present_actors(&self, location_id: LocationId) -> Vec<&Actor> {
        self.actors
            .values()
            .filter(|actor| !actor.remote)
            .filter(|actor| self.actor_locations.get(&actor.id) == Some(&location_id))
            .collect()
    }

    /// Current level of a station stat, if the station exists and tracks it.
    pub fn station_stat(&self, stat: StationStat) -> Option<i32> {
        self.station_stats
            .as_ref()
            .and_then(|stats| stats.get(&stat).copied())
    }

    /// Initialise every station stat to the same level.
    pub fn init_station_stats(&mut self, level: i32) {
        let level = level.max(STATION_STAT_FLOOR);
        self.station_stats = Some(StationStat::ALL.into_iter().map(|s| (s, level)).collect());
    }

    /// Apply accumulated stat deltas. Unknown actor ids are skipped.
    pub fn apply_stat_changes(&mut self, changes: &StatChanges) {
        for (actor_id, deltas) in changes {
            let Some(actor) = self.actors.get_mut(actor_id) else {
                tracing::debug!(%actor_id, "Skipping stat changes for unknown actor");
                continue;
            };
            for (stat, delta) in deltas {
                actor.adjust_stat(*stat, *delta);
            }
        }
    }

    /// Apply signed station deltas, clamping at [`STATION_STAT_FLOOR`].
    pub fn apply_station_deltas(&mut self, deltas: &StationStatMap) {
        let stats = self.station_stats.get_or_insert_with(StationStatMap::new);
        for (stat, delta) in deltas {
            let level = stats.entry(*stat).or_insert(STATION_STAT_FLOOR);
            *level = level.saturating_add(*delta).max(STATION_STAT_FLOOR);
        }
    }
}
