//! Stat adjustment tags: `[<name><: or -><stat phrase>(, or | <stat phrase>)*]`.

use game_rules::{resolve_name, EntityId, Stat, StatChanges};
use regex_lite::Regex;
use std::sync::LazyLock;

use super::SceneCast;

// "Charisma + 2", "trust-1", "raw brawn -3"
static STAT_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z\s]*?)\s*([+-])\s*(\d+)$").expect("valid regex")
});

/// One resolved adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatAdjustment {
    pub actor_id: EntityId,
    pub stat: Stat,
    pub delta: i32,
}

/// Parse a tag body into adjustments for a cast member.
///
/// Returns an empty list when the body has no delimiter, names nobody in the
/// cast, or contains no usable phrases. Bad phrases are skipped individually.
pub fn parse_stat_tag(body: &str, cast: &SceneCast) -> Vec<StatAdjustment> {
    let Some(split_at) = body.find([':', '-']) else {
        return Vec::new();
    };
    let (name, payload) = (&body[..split_at], &body[split_at + 1..]);

    let Some(actor_id) = resolve_name(name, cast.members()) else {
        tracing::debug!(name = name.trim(), "Stat tag names nobody in the scene");
        return Vec::new();
    };

    payload
        .split('|')
        .flat_map(|group| group.split(','))
        .map(str::trim)
        .filter(|phrase| !phrase.is_empty())
        .filter_map(|phrase| {
            let adjustment = parse_phrase(phrase);
            if adjustment.is_none() {
                tracing::debug!(phrase, "Skipping unrecognised stat phrase");
            }
            adjustment
        })
        .map(|(stat, delta)| StatAdjustment {
            actor_id,
            stat,
            delta,
        })
        .collect()
}

/// Parse a tag body and add its deltas into `changes`.
pub fn accumulate_stat_tag(body: &str, cast: &SceneCast, changes: &mut StatChanges) -> usize {
    let adjustments = parse_stat_tag(body, cast);
    for adjustment in &adjustments {
        let total = changes
            .entry(adjustment.actor_id)
            .or_default()
            .entry(adjustment.stat)
            .or_insert(0);
        *total = total.saturating_add(adjustment.delta);
    }
    adjustments.len()
}

fn parse_phrase(phrase: &str) -> Option<(Stat, i32)> {
    let caps = STAT_PHRASE_RE.captures(phrase)?;
    let stat = Stat::match_loose(caps.get(1)?.as_str())?;
    let magnitude: i32 = caps.get(3)?.as_str().parse().ok()?;
    let delta = if caps.get(2)?.as_str() == "-" {
        -magnitude
    } else {
        magnitude
    };
    Some((stat, delta))
}
