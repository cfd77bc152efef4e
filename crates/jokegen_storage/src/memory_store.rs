//! Process-local result store.

use async_trait::async_trait;
use jokegen_core::{StoryResult, StoryType};
use jokegen_error::JokegenResult;
use jokegen_interface::ResultStore;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Keeps the latest result per story type in memory. Contents are lost when
/// the process exits.
#[derive(Debug, Default)]
pub struct InMemoryResultStore {
    results: RwLock<HashMap<StoryType, StoryResult>>,
}

impl InMemoryResultStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of story types with a stored result.
    pub fn len(&self) -> usize {
        self.results.read().len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.results.read().is_empty()
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn put(&self, story_type: StoryType, result: &StoryResult) -> JokegenResult<()> {
        self.results.write().insert(story_type, result.clone());
        Ok(())
    }

    async fn get_latest(&self, story_type: StoryType) -> JokegenResult<Option<StoryResult>> {
        Ok(self.results.read().get(&story_type).cloned())
    }
}
