//! Script director - generates scene text with bounded retries and parses it.

use std::sync::Arc;
use std::time::Duration;

use super::{GenerationRequest, TextGenerator};
use crate::config::ScriptConfig;
use crate::script::{assemble_script, SceneCast, ScriptResult};

/// Drives the text generator until it yields usable scene text.
pub struct ScriptDirector {
    generator: Arc<dyn TextGenerator>,
    config: ScriptConfig,
}

impl ScriptDirector {
    pub fn new(generator: Arc<dyn TextGenerator>, config: ScriptConfig) -> Self {
        Self { generator, config }
    }

    /// Create a director with default configuration.
    pub fn with_defaults(generator: Arc<dyn TextGenerator>) -> Self {
        Self::new(generator, ScriptConfig::default())
    }

    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    /// Generate and parse one scene.
    ///
    /// Attempts run strictly one after another. Errors and blank output use
    /// up an attempt; once all are spent the [`ScriptResult::empty`] sentinel
    /// is returned instead of an error.
    pub async fn generate_script(
        &self,
        request: &GenerationRequest,
        cast: &SceneCast,
    ) -> ScriptResult {
        let max_attempts = self.config.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.generator.generate(request.clone()).await {
                Ok(Some(generation)) if generation.has_content() => {
                    if attempt > 1 {
                        tracing::info!(attempt, "Scene generation succeeded after retry");
                    }
                    return assemble_script(
                        &generation.result,
                        cast,
                        &self.config.narrator_label,
                    );
                }
                Ok(_) => {
                    tracing::warn!(attempt, max_attempts, "Scene generation returned no text");
                }
                Err(e) => {
                    tracing::error!(attempt, max_attempts, error = %e, "Scene generation failed");
                }
            }

            if attempt < max_attempts && self.config.retry_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
            }
        }

        tracing::warn!(
            attempts = max_attempts,
            "Scene generation gave up, returning empty script"
        );
        ScriptResult::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{Generation, GenerationError};
    use async_trait::async_trait;
    use game_rules::{EntityId, Stat};
    use mockall::mock;
    use std::sync::Mutex;

    mock! {
        Generator {}

        #[async_trait]
        impl TextGenerator for Generator {
            async fn generate(
                &self,
                request: GenerationRequest,
            ) -> Result<Option<Generation>, GenerationError>;
        }
    }

    /// Plays back canned outcomes in order, then keeps returning blank text.
    struct ScriptedGenerator {
        outcomes: Mutex<Vec<Result<Option<Generation>, GenerationError>>>,
        calls: Mutex<u32>,
    }

    impl ScriptedGenerator {
        fn new(mut outcomes: Vec<Result<Option<Generation>, GenerationError>>) -> Self {
            outcomes.reverse();
            Self {
                outcomes: Mutex::new(outcomes),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            _request: GenerationRequest,
        ) -> Result<Option<Generation>, GenerationError> {
            *self.calls.lock().unwrap() += 1;
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(Some(Generation::new("   "))))
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("Continue the scene.", 300).with_stop_sequence("\n\n\n")
    }

    #[tokio::test]
    async fn test_blank_output_exhausts_three_attempts() {
        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .times(3)
            .returning(|_| Ok(Some(Generation::new("  \n "))));

        let director = ScriptDirector::with_defaults(Arc::new(generator));
        let result = director
            .generate_script(&request(), &SceneCast::default())
            .await;

        assert!(result.is_empty());
        assert_eq!(result, ScriptResult::empty());
    }

    #[tokio::test]
    async fn test_errors_and_none_are_retried() {
        let elena = EntityId::new();
        let cast = SceneCast::new([(elena, "Elena")]);
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Err(GenerationError::RequestFailed("connection reset".to_string())),
            Ok(None),
            Ok(Some(Generation::new("Elena: We made it. [Elena: trust+1] [END]"))),
        ]));

        let director = ScriptDirector::with_defaults(generator.clone());
        let result = director.generate_script(&request(), &cast).await;

        assert_eq!(generator.calls(), 3);
        assert!(result.end_scene);
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].message, "We made it.");
        assert_eq!(result.stat_changes[&elena][&Stat::Trust], 1);
    }

    #[tokio::test]
    async fn test_stops_at_first_usable_output() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Ok(Some(Generation::new(
            "The lights flicker.",
        )))]));

        let director = ScriptDirector::with_defaults(generator.clone());
        let result = director
            .generate_script(&request(), &SceneCast::default())
            .await;

        assert_eq!(generator.calls(), 1);
        assert_eq!(result.entries[0].speaker, "NARRATOR");
    }

    #[tokio::test]
    async fn test_configured_attempts_and_label() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok(None),
            Ok(None),
            Ok(None),
            Ok(Some(Generation::new("Silence."))),
        ]));
        let config = ScriptConfig {
            max_attempts: 4,
            retry_delay_ms: 1,
            narrator_label: "VOICE".to_string(),
        };

        let director = ScriptDirector::new(generator.clone(), config);
        let result = director
            .generate_script(&request(), &SceneCast::default())
            .await;

        assert_eq!(generator.calls(), 4);
        assert_eq!(result.entries[0].speaker, "VOICE");
    }
}
