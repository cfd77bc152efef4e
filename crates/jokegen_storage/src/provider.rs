//! Pairing a vocabulary with a result store.

use async_trait::async_trait;
use jokegen_core::{StoryDataCategory, StoryResult, StoryType};
use jokegen_error::JokegenResult;
use jokegen_interface::{RandomSource, ResultStore, StoryDataProvider, VocabularySource};
use tracing::debug;

/// A [`StoryDataProvider`] assembled from independent parts.
///
/// # Examples
///
/// ```
/// use jokegen_interface::StoryDataProvider;
/// use jokegen_storage::{CompositeDataProvider, EmbeddedVocabulary, InMemoryResultStore};
///
/// let provider = CompositeDataProvider::new(
///     "embedded",
///     EmbeddedVocabulary::new(),
///     InMemoryResultStore::new(),
/// );
/// assert_eq!(provider.backend_name(), "embedded");
/// ```
#[derive(Debug)]
pub struct CompositeDataProvider<V, S> {
    name: &'static str,
    vocabulary: V,
    store: S,
}

impl<V, S> CompositeDataProvider<V, S>
where
    V: VocabularySource,
    S: ResultStore,
{
    /// Combine `vocabulary` and `store` under the backend name `name`.
    pub fn new(name: &'static str, vocabulary: V, store: S) -> Self {
        Self {
            name,
            vocabulary,
            store,
        }
    }

    /// The vocabulary half.
    pub fn vocabulary(&self) -> &V {
        &self.vocabulary
    }

    /// The store half.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<V, S> VocabularySource for CompositeDataProvider<V, S>
where
    V: VocabularySource,
    S: ResultStore,
{
    async fn sample(
        &self,
        category: StoryDataCategory,
        story_type: StoryType,
        rng: &dyn RandomSource,
    ) -> JokegenResult<String> {
        self.vocabulary.sample(category, story_type, rng).await
    }
}

#[async_trait]
impl<V, S> ResultStore for CompositeDataProvider<V, S>
where
    V: VocabularySource,
    S: ResultStore,
{
    async fn put(&self, story_type: StoryType, result: &StoryResult) -> JokegenResult<()> {
        self.store.put(story_type, result).await
    }

    async fn get_latest(&self, story_type: StoryType) -> JokegenResult<Option<StoryResult>> {
        self.store.get_latest(story_type).await
    }
}

#[async_trait]
impl<V, S> StoryDataProvider for CompositeDataProvider<V, S>
where
    V: VocabularySource,
    S: ResultStore,
{
    fn backend_name(&self) -> &'static str {
        self.name
    }

    async fn close(&self) -> JokegenResult<()> {
        // Every write is flushed before `put` returns.
        debug!(backend = self.name, "Provider closed");
        Ok(())
    }
}
