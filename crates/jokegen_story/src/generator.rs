//! The generation orchestrator.

use crate::cache::{CacheDecision, CachePolicy};
use crate::composer::compose_prompt;
use chrono::Utc;
use jokegen_core::{StoryOptions, StoryResult, StoryType};
use jokegen_error::JokegenResult;
use jokegen_interface::{JokegenDriver, RandomSource, StoryDataProvider, ThreadRandom};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Produces stories: cache check, prompt composition, generation, persistence.
///
/// Holds shared handles only, so one generator can serve concurrent requests.
/// Requests are not coordinated with each other; two concurrent misses for
/// the same story type both generate, and the later write wins.
#[derive(Clone)]
pub struct StoryGenerator {
    provider: Arc<dyn StoryDataProvider>,
    driver: Arc<dyn JokegenDriver>,
    rng: Arc<dyn RandomSource>,
    cache: CachePolicy,
}

impl std::fmt::Debug for StoryGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryGenerator")
            .field("backend", &self.provider.backend_name())
            .field("provider", &self.driver.provider_name())
            .field("model", &self.driver.model_name())
            .field("cache", &self.cache)
            .finish()
    }
}

impl StoryGenerator {
    /// Creates a generator with thread-local randomness and the default
    /// cache window.
    pub fn new(provider: Arc<dyn StoryDataProvider>, driver: Arc<dyn JokegenDriver>) -> Self {
        Self {
            provider,
            driver,
            rng: Arc::new(ThreadRandom),
            cache: CachePolicy::default(),
        }
    }

    /// Replace the random source.
    pub fn with_random(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Replace the cache policy.
    pub fn with_cache_policy(mut self, cache: CachePolicy) -> Self {
        self.cache = cache;
        self
    }

    /// The data backend.
    pub fn provider(&self) -> &Arc<dyn StoryDataProvider> {
        &self.provider
    }

    /// The cache policy in use.
    pub fn cache_policy(&self) -> &CachePolicy {
        &self.cache
    }

    /// Produce a story of `story_type`.
    ///
    /// Returns the cached story when it is younger than the cache window and
    /// `force_regenerate` is unset. Otherwise composes a prompt, asks the
    /// driver for a completion and stores the new result before returning it.
    ///
    /// # Errors
    ///
    /// - vocabulary errors when a slot draw fails; the driver is not called
    /// - generation errors from the driver; nothing is stored
    /// - store errors when persisting the new result
    #[instrument(
        name = "story.generate",
        skip(self, options),
        fields(
            story_type = %story_type,
            backend = self.provider.backend_name(),
            force = options.force_regenerate(),
        )
    )]
    pub async fn generate_story(
        &self,
        story_type: StoryType,
        options: &StoryOptions,
    ) -> JokegenResult<StoryResult> {
        let decision = self
            .cache
            .check(
                story_type,
                options.force_regenerate(),
                Utc::now(),
                self.provider.as_ref(),
            )
            .await;

        let reason = match decision {
            CacheDecision::Reuse(cached) => {
                info!(generated_at = %cached.timestamp(), "Returning cached story");
                return Ok(cached);
            }
            CacheDecision::Regenerate(reason) => reason,
        };
        debug!(%reason, "Generating new story");

        let prompt = compose_prompt(
            story_type,
            options,
            self.provider.as_ref(),
            self.rng.as_ref(),
        )
        .await?;

        let start = Instant::now();
        let story = self.driver.complete(&prompt).await?;
        info!(
            provider = self.driver.provider_name(),
            model = self.driver.model_name(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Story generated"
        );

        let result = StoryResult::new(prompt, story, Utc::now());
        self.provider.put(story_type, &result).await?;
        debug!("Story stored");

        Ok(result)
    }

    /// Parse `name` as a story type, then [`generate_story`](Self::generate_story).
    ///
    /// # Errors
    ///
    /// Fails with an unknown story type error before any other work when
    /// `name` does not parse.
    pub async fn parse_and_generate(
        &self,
        name: &str,
        options: &StoryOptions,
    ) -> JokegenResult<StoryResult> {
        let story_type = StoryType::parse(name)?;
        self.generate_story(story_type, options).await
    }
}
