//! Splitting cleaned scene text into speaker/message entries.

use serde::{Deserialize, Serialize};

/// One line of dialogue in playback order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub speaker: String,
    pub message: String,
}

impl ScriptEntry {
    pub fn new(speaker: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            message: message.into(),
        }
    }
}

/// Group lines into entries. A line containing `:` opens a new entry; any
/// other line continues the current one. Blank lines are dropped and trailing
/// whitespace (often left behind by a stripped tag) is removed; indentation
/// is kept.
pub fn merge_lines(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<String> = None;

    for line in text.lines().map(str::trim_end).filter(|line| !line.is_empty()) {
        if !line.contains(':') {
            if let Some(block) = current.as_mut() {
                block.push('\n');
                block.push_str(line);
                continue;
            }
        }
        if let Some(done) = current.replace(line.to_string()) {
            blocks.push(done);
        }
    }
    blocks.extend(current);
    blocks
}

/// Split a merged block at its first `:`. Blocks without a speaker belong to
/// the narrator.
pub fn split_entry(block: &str, narrator_label: &str) -> ScriptEntry {
    match block.split_once(':') {
        Some((speaker, message)) => ScriptEntry::new(speaker.trim(), message.trim()),
        None => ScriptEntry::new(narrator_label, block.trim()),
    }
}

/// Turn tag-free text into ordered script entries.
pub fn split_entries(text: &str, narrator_label: &str) -> Vec<ScriptEntry> {
    merge_lines(text)
        .iter()
        .map(|block| split_entry(block, narrator_label))
        .collect()
}
