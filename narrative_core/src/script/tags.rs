//! Bracket tag scanning for generated scene text.

use regex_lite::Regex;
use std::ops::Range;
use std::sync::LazyLock;

// Non-greedy by construction: the body may not contain another bracket.
static BRACKET_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]").expect("valid regex"));

/// A `[...]` tag found in raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTag<'a> {
    /// Text between the brackets, untrimmed.
    pub body: &'a str,
    /// Byte span of the whole tag, brackets included.
    pub span: Range<usize>,
}

/// What a bracket tag means to the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    EndMarker,
    /// Has a `:` or `-` delimiter; may or may not resolve to real adjustments.
    StatAdjustment,
    Decorative,
}

impl<'a> BracketTag<'a> {
    pub fn is_end_marker(&self) -> bool {
        is_end_marker(self.body)
    }

    pub fn kind(&self) -> TagKind {
        if self.is_end_marker() {
            TagKind::EndMarker
        } else if self.body.contains([':', '-']) {
            TagKind::StatAdjustment
        } else {
            TagKind::Decorative
        }
    }
}

/// All bracket tags in `text`, left to right.
pub fn scan_tags(text: &str) -> Vec<BracketTag<'_>> {
    BRACKET_TAG_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let body = caps.get(1)?;
            Some(BracketTag {
                body: body.as_str(),
                span: whole.range(),
            })
        })
        .collect()
}

/// `END`, `DONE`, or anything starting with `END SCENE`, ignoring case.
pub fn is_end_marker(body: &str) -> bool {
    let body = body.trim().to_uppercase();
    body == "END" || body == "DONE" || body.starts_with("END SCENE")
}

/// Whether any tag anywhere in the raw text ends the scene.
pub fn detect_scene_end(text: &str) -> bool {
    scan_tags(text).iter().any(BracketTag::is_end_marker)
}

/// Remove every bracket tag, leaving surrounding text untouched.
pub fn strip_tags(text: &str) -> String {
    BRACKET_TAG_RE.replace_all(text, "").into_owned()
}
