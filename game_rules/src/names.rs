//! Fuzzy name resolution for names produced by a text generator.

/// Resolve a free-text name against canonical candidates.
///
/// Matching ignores case. An exact match anywhere in `candidates` wins.
/// Failing that, the first candidate (in iteration order) whose name contains
/// the fragment, or is contained in it, is returned. Blank fragments and blank
/// candidate names never match.
pub fn resolve_name<'a, K, I>(fragment: &str, candidates: I) -> Option<K>
where
    I: IntoIterator<Item = (K, &'a str)>,
{
    let fragment = fragment.trim().to_lowercase();
    if fragment.is_empty() {
        return None;
    }

    let mut first_partial = None;
    for (key, name) in candidates {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            continue;
        }
        if name == fragment {
            return Some(key);
        }
        if first_partial.is_none() && (name.contains(&fragment) || fragment.contains(&name)) {
            first_partial = Some(key);
        }
    }
    first_partial
}
