//! Text generation port and the script director that drives it.

mod director;

pub use director::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Failure reported by a [`TextGenerator`] backend. Empty output is not an
/// error; it comes back as `Ok(None)` or a blank [`Generation`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    #[error("Generation request failed: {0}")]
    RequestFailed(String),
}

/// What to ask the generator for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Sequences that stop generation early.
    pub stop_sequences: Vec<String>,
    pub min_tokens: Option<u32>,
    pub max_tokens: u32,
    /// Whether prior conversation is sent along with the prompt.
    pub include_history: bool,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            stop_sequences: Vec::new(),
            min_tokens: None,
            max_tokens,
            include_history: false,
        }
    }

    pub fn with_stop_sequence(mut self, stop: impl Into<String>) -> Self {
        self.stop_sequences.push(stop.into());
        self
    }

    pub fn with_min_tokens(mut self, min_tokens: u32) -> Self {
        self.min_tokens = Some(min_tokens);
        self
    }

    pub fn with_history(mut self, include_history: bool) -> Self {
        self.include_history = include_history;
        self
    }
}

/// Raw generator output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    pub result: String,
}

impl Generation {
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
        }
    }

    /// Whether the output has any non-whitespace text.
    pub fn has_content(&self) -> bool {
        !self.result.trim().is_empty()
    }
}

/// The external text generator. `Ok(None)` means the call succeeded but
/// produced nothing.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest)
        -> Result<Option<Generation>, GenerationError>;
}
