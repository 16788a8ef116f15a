//! Closed stat vocabularies for actors and the station.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ids::EntityId;

/// Attributes scored on every actor.
///
/// Declaration order matters: loose matching walks [`Stat::ALL`] in this
/// order and keeps the first hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Brawn,
    Wits,
    Nimbleness,
    Charm,
    Charisma,
    Trust,
    Resolve,
}

impl Stat {
    pub const ALL: [Stat; 7] = [
        Stat::Brawn,
        Stat::Wits,
        Stat::Nimbleness,
        Stat::Charm,
        Stat::Charisma,
        Stat::Trust,
        Stat::Resolve,
    ];

    /// Canonical lower-case name.
    pub fn name(&self) -> &'static str {
        match self {
            Stat::Brawn => "brawn",
            Stat::Wits => "wits",
            Stat::Nimbleness => "nimbleness",
            Stat::Charm => "charm",
            Stat::Charisma => "charisma",
            Stat::Trust => "trust",
            Stat::Resolve => "resolve",
        }
    }

    /// Exact lookup, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Stat> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|stat| stat.name() == name)
    }

    /// Tolerant lookup for generated phrasing.
    ///
    /// An exact match wins; otherwise the first stat whose name contains the
    /// phrase, or is contained in it, is returned.
    pub fn match_loose(phrase: &str) -> Option<Stat> {
        let phrase = phrase.trim().to_lowercase();
        if phrase.is_empty() {
            return None;
        }
        Self::from_name(&phrase).or_else(|| {
            Self::ALL
                .into_iter()
                .find(|stat| stat.name().contains(&phrase) || phrase.contains(stat.name()))
        })
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Station-wide resources, shared by everyone aboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StationStat {
    Systems,
    Comfort,
    Provision,
    Security,
    Harmony,
    Wealth,
}

impl StationStat {
    pub const ALL: [StationStat; 6] = [
        StationStat::Systems,
        StationStat::Comfort,
        StationStat::Provision,
        StationStat::Security,
        StationStat::Harmony,
        StationStat::Wealth,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StationStat::Systems => "Systems",
            StationStat::Comfort => "Comfort",
            StationStat::Provision => "Provision",
            StationStat::Security => "Security",
            StationStat::Harmony => "Harmony",
            StationStat::Wealth => "Wealth",
        }
    }

    /// Case-insensitive lookup.
    pub fn from_name(name: &str) -> Option<StationStat> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|stat| stat.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for StationStat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Partial stat map. A missing key means "unspecified", not zero.
pub type StatMap = BTreeMap<Stat, i32>;

/// Partial station stat map. A missing key means "unspecified", not zero.
pub type StationStatMap = BTreeMap<StationStat, i32>;

/// Accumulated per-actor stat deltas from one generation cycle.
pub type StatChanges = BTreeMap<EntityId, StatMap>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_from_name_is_exact() {
        assert_eq!(Stat::from_name("Brawn"), Some(Stat::Brawn));
        assert_eq!(Stat::from_name("  CHARM "), Some(Stat::Charm));
        assert_eq!(Stat::from_name("brawny"), None);
        assert_eq!(Stat::from_name(""), None);
    }

    #[test]
    fn test_stat_match_loose() {
        assert_eq!(Stat::match_loose("Charisma"), Some(Stat::Charisma));
        assert_eq!(Stat::match_loose("wit"), Some(Stat::Wits));
        assert_eq!(Stat::match_loose("raw brawn"), Some(Stat::Brawn));
        assert_eq!(Stat::match_loose("luck"), None);
        assert_eq!(Stat::match_loose("   "), None);
    }

    #[test]
    fn test_stat_match_loose_prefers_exact() {
        assert_eq!(Stat::match_loose("charm"), Some(Stat::Charm));
    }

    #[test]
    fn test_station_stat_from_name() {
        assert_eq!(StationStat::from_name("systems"), Some(StationStat::Systems));
        assert_eq!(StationStat::from_name("PROVISION"), Some(StationStat::Provision));
        assert_eq!(StationStat::from_name("Sys"), None);
    }

    #[test]
    fn test_stat_serde_names() {
        let json = serde_json::to_string(&Stat::Nimbleness).unwrap();
        assert_eq!(json, "\"nimbleness\"");
        let json = serde_json::to_string(&StationStat::Harmony).unwrap();
        assert_eq!(json, "\"Harmony\"");
    }
}
