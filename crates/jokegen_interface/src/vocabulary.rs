//! Vocabulary source trait.

use crate::RandomSource;
use async_trait::async_trait;
use jokegen_core::{StoryDataCategory, StoryType};
use jokegen_error::JokegenResult;

/// Supplies random prompt fragments.
///
/// Implementations are backed by line-delimited text resources or a
/// relational table; the pipeline does not care which.
#[async_trait]
pub trait VocabularySource: Send + Sync {
    /// Draw one entry uniformly from the pool for `category` and `story_type`.
    ///
    /// # Errors
    ///
    /// Returns a vocabulary error if the pool is empty or cannot be read.
    async fn sample(
        &self,
        category: StoryDataCategory,
        story_type: StoryType,
        rng: &dyn RandomSource,
    ) -> JokegenResult<String>;
}
