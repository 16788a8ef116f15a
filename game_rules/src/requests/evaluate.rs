//! Requirement evaluation against a world snapshot.

use crate::entities::{Actor, StatMap};
use crate::names::resolve_name;
use crate::world_state::WorldState;

use super::Requirement;

impl Requirement {
    /// Decide whether this requirement currently holds.
    ///
    /// Pure: reads the snapshot, never mutates it.
    pub fn can_fulfill(&self, world: &WorldState) -> bool {
        match self {
            Requirement::ActorWithStats {
                min_stats,
                max_stats,
            } => world
                .actors
                .values()
                .filter(|actor| !actor.remote)
                .any(|actor| within_bounds(actor, min_stats, max_stats)),
            // Only on-site actors are candidates.
            Requirement::SpecificActor { actor_name } => resolve_name(
                actor_name,
                world
                    .actors
                    .values()
                    .filter(|actor| !actor.remote)
                    .map(|actor| (actor.id, actor.name.as_str())),
            )
            .is_some(),
            Requirement::StationStats { deltas } => {
                let Some(levels) = world.station_stats.as_ref() else {
                    return false;
                };
                // Paying must leave every stat at 1 or more.
                deltas.iter().all(|(stat, amount)| {
                    levels.get(stat).is_some_and(|level| *level > *amount)
                })
            }
            Requirement::Unknown => {
                tracing::warn!("Cannot evaluate requirement of unknown kind");
                false
            }
        }
    }
}

/// Evaluate a requirement against a snapshot.
pub fn can_fulfill(requirement: &Requirement, world: &WorldState) -> bool {
    requirement.can_fulfill(world)
}

fn within_bounds(actor: &Actor, min_stats: &StatMap, max_stats: &StatMap) -> bool {
    min_stats
        .iter()
        .all(|(stat, bound)| actor.stat(*stat) >= *bound)
        && max_stats
            .iter()
            .all(|(stat, bound)| actor.stat(*stat) <= *bound)
}
