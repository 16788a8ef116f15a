//! Faction requests: conditional exchanges offered to the station.
//!
//! A [`Request`] pairs a [`Requirement`] the world must satisfy with a
//! [`Reward`] granted once it is fulfilled. Whether a requirement currently
//! holds is decided by [`Requirement::can_fulfill`] against a read-only
//! [`WorldState`] snapshot.

mod evaluate;

pub use evaluate::*;

use serde::{Deserialize, Serialize};

use crate::entities::{StatMap, StationStatMap};
use crate::ids::RequestId;
use crate::world_state::WorldState;

/// What the station has to provide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Requirement {
    /// Some on-site actor within the given stat bounds.
    ActorWithStats {
        #[serde(default)]
        min_stats: StatMap,
        #[serde(default)]
        max_stats: StatMap,
    },

    /// One particular actor, by name.
    SpecificActor { actor_name: String },

    /// Station resources to hand over.
    StationStats { deltas: StationStatMap },

    /// A kind this build does not know, e.g. from a newer save.
    #[serde(other)]
    Unknown,
}

/// What the faction gives back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reward {
    StationStats { deltas: StationStatMap },
}

impl Reward {
    /// Station stat deltas granted by this reward.
    pub fn station_deltas(&self) -> &StationStatMap {
        match self {
            Reward::StationStats { deltas } => deltas,
        }
    }
}

/// A faction-issued offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub faction_name: String,
    pub description: String,
    pub requirement: Requirement,
    pub reward: Reward,
}

impl Request {
    pub fn new(
        faction_name: impl Into<String>,
        description: impl Into<String>,
        requirement: Requirement,
        reward: Reward,
    ) -> Self {
        Self {
            id: RequestId::new(),
            faction_name: faction_name.into(),
            description: description.into(),
            requirement,
            reward,
        }
    }

    /// Whether the requirement holds in the given snapshot.
    pub fn can_fulfill(&self, world: &WorldState) -> bool {
        self.requirement.can_fulfill(world)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Stat, StationStat};
    use uuid::Uuid;

    fn sample_request() -> Request {
        let mut min_stats = StatMap::new();
        min_stats.insert(Stat::Brawn, 7);
        let mut deltas = StationStatMap::new();
        deltas.insert(StationStat::Systems, 2);
        Request::new(
            "Stellar Concord",
            "We need a strong laborer",
            Requirement::ActorWithStats {
                min_stats,
                max_stats: StatMap::new(),
            },
            Reward::StationStats { deltas },
        )
    }

    #[test]
    fn test_request_json_round_trip() {
        let request = sample_request();
        let json = request.to_json().unwrap();
        assert!(json.contains("\"kind\":\"actor_with_stats\""));

        let restored = Request::from_json(&json).unwrap();
        assert_eq!(restored, request);
    }

    #[test]
    fn test_unknown_requirement_kind_restores_as_unknown() {
        let json = serde_json::json!({
            "id": Uuid::nil(),
            "faction_name": "Shadow Syndicate",
            "description": "Something new",
            "requirement": { "kind": "time_limit", "days": 3 },
            "reward": { "kind": "station_stats", "deltas": { "Harmony": 3 } }
        })
        .to_string();

        let restored = Request::from_json(&json).unwrap();
        assert_eq!(restored.requirement, Requirement::Unknown);
        assert_eq!(
            restored.reward.station_deltas().get(&StationStat::Harmony),
            Some(&3)
        );
    }

    #[test]
    fn test_unknown_reward_kind_is_rejected() {
        let json = serde_json::json!({
            "id": Uuid::nil(),
            "faction_name": "X",
            "description": "Y",
            "requirement": { "kind": "specific_actor", "actor_name": "Jane" },
            "reward": { "kind": "credits", "amount": 5 }
        })
        .to_string();

        assert!(Request::from_json(&json).is_err());
    }
}
