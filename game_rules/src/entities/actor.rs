//! Actor definitions.

use serde::{Deserialize, Serialize};

use super::{Stat, StatMap};
use crate::ids::EntityId;

/// A participant who can appear in scenes and fulfil requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub stats: StatMap,
    /// Off-site actors are known to the world but not physically present.
    #[serde(default)]
    pub remote: bool,
}

impl Actor {
    /// Create a new on-site actor with no recorded stats.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            stats: StatMap::new(),
            remote: false,
        }
    }

    /// Builder-style stat assignment.
    pub fn with_stat(mut self, stat: Stat, value: i32) -> Self {
        self.stats.insert(stat, value);
        self
    }

    /// Builder-style remote flag.
    pub fn with_remote(mut self, remote: bool) -> Self {
        self.remote = remote;
        self
    }

    /// Current score for a stat; unrecorded stats read as 0.
    pub fn stat(&self, stat: Stat) -> i32 {
        self.stats.get(&stat).copied().unwrap_or(0)
    }

    /// Add a signed delta to a stat, saturating at the `i32` bounds.
    pub fn adjust_stat(&mut self, stat: Stat, delta: i32) {
        let value = self.stats.entry(stat).or_insert(0);
        *value = value.saturating_add(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_actor() {
        let actor = Actor::new("Elena");
        assert_eq!(actor.name, "Elena");
        assert!(!actor.remote);
        assert_eq!(actor.stat(Stat::Brawn), 0);
    }

    #[test]
    fn test_adjust_stat() {
        let mut actor = Actor::new("Guard").with_stat(Stat::Brawn, 5);
        actor.adjust_stat(Stat::Brawn, -2);
        actor.adjust_stat(Stat::Trust, 3);
        assert_eq!(actor.stat(Stat::Brawn), 3);
        assert_eq!(actor.stat(Stat::Trust), 3);
    }

    #[test]
    fn test_adjust_stat_saturates() {
        let mut actor = Actor::new("Elena").with_stat(Stat::Trust, i32::MAX - 1);
        actor.adjust_stat(Stat::Trust, 2_000_000_000);
        assert_eq!(actor.stat(Stat::Trust), i32::MAX);
    }
}
