//! Script assembly - turns raw generated scene text into playable entries.
//!
//! The pipeline over one block of generated text:
//! 1. **Scan**: find every `[...]` tag in the raw text
//! 2. **End detection**: any end marker anywhere ends the scene
//! 3. **Stat extraction**: remaining tags may adjust stats of the present cast
//! 4. **Strip**: all tags are removed from the displayed text
//! 5. **Split**: cleaned lines become speaker/message entries

mod lines;
mod stat_tags;
mod tags;

pub use lines::*;
pub use stat_tags::*;
pub use tags::*;

use game_rules::{EntityId, LocationId, StatChanges, WorldState};
use serde::{Deserialize, Serialize};

/// Actors present in the active location, in resolution order.
#[derive(Debug, Clone, Default)]
pub struct SceneCast {
    members: Vec<(EntityId, String)>,
}

impl SceneCast {
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = (EntityId, S)>,
        S: Into<String>,
    {
        Self {
            members: members
                .into_iter()
                .map(|(id, name)| (id, name.into()))
                .collect(),
        }
    }

    /// Everyone physically present at `location` in the snapshot.
    pub fn at_location(world: &WorldState, location: LocationId) -> Self {
        Self::new(
            world
                .present_actors(location)
                .into_iter()
                .map(|actor| (actor.id, actor.name.clone())),
        )
    }

    pub fn members(&self) -> impl Iterator<Item = (EntityId, &str)> + '_ {
        self.members.iter().map(|(id, name)| (*id, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Output of one generation-and-parse cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptResult {
    pub entries: Vec<ScriptEntry>,
    pub end_scene: bool,
    pub stat_changes: StatChanges,
}

impl ScriptResult {
    /// The "nothing was produced" result returned after generation gives up.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True for the [`ScriptResult::empty`] sentinel.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && !self.end_scene && self.stat_changes.is_empty()
    }
}

/// Parse raw generated text into a [`ScriptResult`].
pub fn assemble_script(raw: &str, cast: &SceneCast, narrator_label: &str) -> ScriptResult {
    let tags = scan_tags(raw);
    let end_scene = tags.iter().any(BracketTag::is_end_marker);

    let mut stat_changes = StatChanges::new();
    for tag in &tags {
        match tag.kind() {
            TagKind::StatAdjustment => {
                accumulate_stat_tag(tag.body, cast, &mut stat_changes);
            }
            TagKind::EndMarker | TagKind::Decorative => {}
        }
    }

    let entries = split_entries(&strip_tags(raw), narrator_label);

    tracing::debug!(
        entries = entries.len(),
        end_scene,
        adjusted_actors = stat_changes.len(),
        "Assembled script"
    );

    ScriptResult {
        entries,
        end_scene,
        stat_changes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_rules::{Actor, Location, Stat};

    #[test]
    fn test_assemble_full_scene() {
        let elena = EntityId::new();
        let cast = SceneCast::new([(elena, "Elena")]);
        let raw = "Elena: Hello there. [Elena: Charisma + 1]\n\
                   She smiles.\n\
                   [Elena - Charisma+2]\n\
                   Guard: Halt! [stands firm]\n\
                   [END SCENE]";

        let result = assemble_script(raw, &cast, "NARRATOR");

        assert!(result.end_scene);
        assert_eq!(
            result.entries,
            vec![
                ScriptEntry::new("Elena", "Hello there.\nShe smiles."),
                ScriptEntry::new("Guard", "Halt!"),
            ]
        );
        assert_eq!(result.stat_changes[&elena][&Stat::Charisma], 3);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_end_marker_position_does_not_matter() {
        let cast = SceneCast::default();
        for raw in ["[END] Elena: Hi.", "Elena: Hi. [end scene]", "Elena: [Done] Hi."] {
            assert!(assemble_script(raw, &cast, "NARRATOR").end_scene, "{raw:?}");
        }
        assert!(!assemble_script("Elena: Hi.", &cast, "NARRATOR").end_scene);
    }

    #[test]
    fn test_stat_tags_for_absent_actors_are_ignored() {
        let cast = SceneCast::new([(EntityId::new(), "Elena")]);
        let result = assemble_script("Guard: Move along. [Guard: brawn+1]", &cast, "NARRATOR");
        assert!(result.stat_changes.is_empty());
        assert_eq!(result.entries, vec![ScriptEntry::new("Guard", "Move along.")]);
    }

    #[test]
    fn test_cast_from_world() {
        let mut world = WorldState::new();
        let deck = world.add_location(Location::new("Observation Deck"));
        let elena = world.add_actor(Actor::new("Elena"));
        let envoy = world.add_actor(Actor::new("Envoy").with_remote(true));
        world.set_actor_location(elena, deck);
        world.set_actor_location(envoy, deck);

        let cast = SceneCast::at_location(&world, deck);
        assert_eq!(cast.len(), 1);

        let result = assemble_script("[Envoy: trust+1][Elena: trust+1]", &cast, "NARRATOR");
        assert_eq!(result.stat_changes.len(), 1);
        assert_eq!(result.stat_changes[&elena][&Stat::Trust], 1);
        assert!(result.entries.is_empty());
    }

    #[test]
    fn test_repeated_huge_stat_tags_do_not_overflow() {
        let elena = EntityId::new();
        let cast = SceneCast::new([(elena, "Elena")]);
        let result = assemble_script(
            "Elena: Hi. [Elena: trust+2000000000] [Elena: trust+2000000000]",
            &cast,
            "NARRATOR",
        );
        assert_eq!(result.stat_changes[&elena][&Stat::Trust], i32::MAX);
        assert_eq!(result.entries, vec![ScriptEntry::new("Elena", "Hi.")]);
    }

    #[test]
    fn test_sentinel() {
        assert!(ScriptResult::empty().is_empty());
    }
}
