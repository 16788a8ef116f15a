//! Request tag DSL.
//!
//! Wire format:
//!
//! ```text
//! [REQUEST: <faction> | <description> | <requirement> -> <reward>]
//! ```
//!
//! where `<requirement>` is one of
//! - `ACTOR-NAME <name>`
//! - `ACTOR <stat>>=<n>` / `ACTOR <stat><=<n>`, comma separated
//! - `STATION <station stat>-<n>`, comma separated
//!
//! and `<reward>` is `<station stat>+<n>`, comma separated.
//!
//! Parsing is all-or-nothing: any violation rejects the whole tag.

use game_rules::{Request, Requirement, Reward, Stat, StatMap, StationStat, StationStatMap};
use regex_lite::Regex;
use std::sync::LazyLock;

static REQUEST_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[REQUEST:([^\[\]]*)\]$").expect("valid regex"));
static ACTOR_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ACTOR-NAME\s+(.+)$").expect("valid regex"));
static ACTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ACTOR\s+(.+)$").expect("valid regex"));
static STATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^STATION\s+(.+)$").expect("valid regex"));
static ACTOR_CONSTRAINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z ]*?)\s*(>=|<=)\s*(-?\d+)$").expect("valid regex")
});
static STATION_DELTA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z ]*?)\s*-\s*(\d+)$").expect("valid regex")
});
static REWARD_DELTA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z ]*?)\s*\+\s*(\d+)$").expect("valid regex")
});

/// Why a request tag was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestParseError {
    #[error("not a [REQUEST: ...] tag")]
    NotARequestTag,
    #[error("expected 3 '|' separated sections, found {0}")]
    SectionCount(usize),
    #[error("faction name is empty")]
    EmptyFaction,
    #[error("description is empty")]
    EmptyDescription,
    #[error("expected exactly one '->' between requirement and reward")]
    MissingArrow,
    #[error("unrecognised requirement: {0}")]
    BadRequirement(String),
    #[error("malformed term: {0}")]
    BadTerm(String),
    #[error("unknown stat: {0}")]
    UnknownStat(String),
    #[error("unknown station stat: {0}")]
    UnknownStationStat(String),
    #[error("value out of range: {0}")]
    BadNumber(String),
}

/// Parse a request tag, rejecting it on any violation.
pub fn parse_request(tag: &str) -> Result<Request, RequestParseError> {
    let tag = tag.trim();
    let caps = REQUEST_TAG_RE
        .captures(tag)
        .ok_or(RequestParseError::NotARequestTag)?;
    let body = caps.get(1).map_or("", |m| m.as_str());

    let sections: Vec<&str> = body.split('|').map(str::trim).collect();
    let [faction, description, exchange] = sections[..] else {
        return Err(RequestParseError::SectionCount(sections.len()));
    };
    if faction.is_empty() {
        return Err(RequestParseError::EmptyFaction);
    }
    if description.is_empty() {
        return Err(RequestParseError::EmptyDescription);
    }

    let halves: Vec<&str> = exchange.split("->").map(str::trim).collect();
    let [requirement, reward] = halves[..] else {
        return Err(RequestParseError::MissingArrow);
    };

    Ok(Request::new(
        faction,
        description,
        parse_requirement(requirement)?,
        parse_reward(reward)?,
    ))
}

/// Parse a request tag, returning `None` for anything malformed.
pub fn parse_request_tag(tag: &str) -> Option<Request> {
    match parse_request(tag) {
        Ok(request) => Some(request),
        Err(e) => {
            tracing::debug!(error = %e, tag, "Rejected request tag");
            None
        }
    }
}

/// Render a request in the tag wire format.
///
/// Returns `None` when the tag would not parse back into the same request:
/// an [`Requirement::Unknown`] requirement, text containing `|`, `[` or `]`,
/// padded or empty fields, or an empty stat list.
pub fn format_request_tag(request: &Request) -> Option<String> {
    let requirement = match &request.requirement {
        Requirement::SpecificActor { actor_name } => format!("ACTOR-NAME {actor_name}"),
        Requirement::ActorWithStats {
            min_stats,
            max_stats,
        } => {
            let terms: Vec<String> = min_stats
                .iter()
                .map(|(stat, n)| format!("{stat}>={n}"))
                .chain(max_stats.iter().map(|(stat, n)| format!("{stat}<={n}")))
                .collect();
            format!("ACTOR {}", terms.join(", "))
        }
        Requirement::StationStats { deltas } => {
            let terms: Vec<String> = deltas.iter().map(|(stat, n)| format!("{stat}-{n}")).collect();
            format!("STATION {}", terms.join(", "))
        }
        Requirement::Unknown => return None,
    };
    let reward: Vec<String> = request
        .reward
        .station_deltas()
        .iter()
        .map(|(stat, n)| format!("{stat}+{n}"))
        .collect();

    let tag = format!(
        "[REQUEST: {} | {} | {} -> {}]",
        request.faction_name,
        request.description,
        requirement,
        reward.join(", ")
    );

    let reparsed = parse_request(&tag).ok();
    let round_trips = reparsed.is_some_and(|r| {
        r.faction_name == request.faction_name
            && r.description == request.description
            && r.requirement == request.requirement
            && r.reward == request.reward
    });
    if !round_trips {
        tracing::debug!(request_id = %request.id, "Request has no tag form");
        return None;
    }
    Some(tag)
}

fn parse_requirement(text: &str) -> Result<Requirement, RequestParseError> {
    // ACTOR-NAME before ACTOR: the latter is a prefix of the former.
    if let Some(caps) = ACTOR_NAME_RE.captures(text) {
        let actor_name = caps.get(1).map_or("", |m| m.as_str()).trim();
        return Ok(Requirement::SpecificActor {
            actor_name: actor_name.to_string(),
        });
    }

    if let Some(caps) = ACTOR_RE.captures(text) {
        let mut min_stats = StatMap::new();
        let mut max_stats = StatMap::new();
        for term in terms(caps.get(1).map_or("", |m| m.as_str())) {
            let c = ACTOR_CONSTRAINT_RE
                .captures(term)
                .ok_or_else(|| RequestParseError::BadTerm(term.to_string()))?;
            let name = c.get(1).map_or("", |m| m.as_str());
            let stat =
                Stat::from_name(name).ok_or_else(|| RequestParseError::UnknownStat(name.to_string()))?;
            let value = parse_number(c.get(3).map_or("", |m| m.as_str()))?;
            match c.get(2).map(|m| m.as_str()) {
                Some(">=") => min_stats.insert(stat, value),
                _ => max_stats.insert(stat, value),
            };
        }
        return Ok(Requirement::ActorWithStats {
            min_stats,
            max_stats,
        });
    }

    if let Some(caps) = STATION_RE.captures(text) {
        let deltas = parse_station_terms(caps.get(1).map_or("", |m| m.as_str()), &STATION_DELTA_RE)?;
        return Ok(Requirement::StationStats { deltas });
    }

    Err(RequestParseError::BadRequirement(text.to_string()))
}

fn parse_reward(text: &str) -> Result<Reward, RequestParseError> {
    let deltas = parse_station_terms(text, &REWARD_DELTA_RE)?;
    Ok(Reward::StationStats { deltas })
}

fn parse_station_terms(text: &str, pattern: &Regex) -> Result<StationStatMap, RequestParseError> {
    let mut deltas = StationStatMap::new();
    for term in terms(text) {
        let c = pattern
            .captures(term)
            .ok_or_else(|| RequestParseError::BadTerm(term.to_string()))?;
        let name = c.get(1).map_or("", |m| m.as_str());
        let stat = StationStat::from_name(name)
            .ok_or_else(|| RequestParseError::UnknownStationStat(name.to_string()))?;
        deltas.insert(stat, parse_number(c.get(2).map_or("", |m| m.as_str()))?);
    }
    Ok(deltas)
}

/// Comma separated terms. Empty terms are kept so they fail to parse.
fn terms(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim)
}

fn parse_number(digits: &str) -> Result<i32, RequestParseError> {
    digits
        .parse()
        .map_err(|_| RequestParseError::BadNumber(digits.to_string()))
}
