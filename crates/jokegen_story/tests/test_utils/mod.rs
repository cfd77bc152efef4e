//! Shared mocks for pipeline tests.
#![allow(dead_code)]

use async_trait::async_trait;
use jokegen_core::{
    GenerateRequest, GenerateResponse, Output, StoryDataCategory, StoryResult, StoryType,
};
use jokegen_error::{
    GenerationError, GenerationErrorKind, JokegenResult, StoreError, StoreErrorKind,
    VocabularyError, VocabularyErrorKind,
};
use jokegen_interface::{
    JokegenDriver, RandomSource, ResultStore, StoryDataProvider, VocabularySource,
};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Random source with scripted answers. Unscripted coin flips come up
/// tails and unscripted indexes are 0.
#[derive(Default)]
pub struct ScriptedRandom {
    coins: Mutex<VecDeque<bool>>,
    indexes: Mutex<VecDeque<usize>>,
    chance_calls: AtomicUsize,
    index_calls: AtomicUsize,
}

impl ScriptedRandom {
    pub fn new(coins: Vec<bool>, indexes: Vec<usize>) -> Self {
        Self {
            coins: Mutex::new(coins.into()),
            indexes: Mutex::new(indexes.into()),
            ..Default::default()
        }
    }

    pub fn chance_calls(&self) -> usize {
        self.chance_calls.load(Ordering::SeqCst)
    }

    pub fn index_calls(&self) -> usize {
        self.index_calls.load(Ordering::SeqCst)
    }
}

impl RandomSource for ScriptedRandom {
    fn chance(&self, _probability: f64) -> bool {
        self.chance_calls.fetch_add(1, Ordering::SeqCst);
        self.coins.lock().pop_front().unwrap_or(false)
    }

    fn index(&self, len: usize) -> usize {
        self.index_calls.fetch_add(1, Ordering::SeqCst);
        let i = self.indexes.lock().pop_front().unwrap_or(0);
        if len == 0 { 0 } else { i % len }
    }
}

/// In-memory vocabulary that records every draw.
#[derive(Default)]
pub struct MockVocabulary {
    pools: HashMap<StoryDataCategory, Vec<String>>,
    draws: Mutex<Vec<(StoryDataCategory, StoryType)>>,
}

impl MockVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(mut self, category: StoryDataCategory, entries: &[&str]) -> Self {
        self.pools
            .insert(category, entries.iter().map(|e| e.to_string()).collect());
        self
    }

    /// Theme, style and modifier pools with a single entry each.
    pub fn simple() -> Self {
        Self::new()
            .with_pool(StoryDataCategory::Theme, &["dragons"])
            .with_pool(StoryDataCategory::Style, &["a limerick"])
            .with_pool(StoryDataCategory::Modifier, &["and a lost sock"])
    }

    pub fn draws(&self) -> Vec<(StoryDataCategory, StoryType)> {
        self.draws.lock().clone()
    }
}

#[async_trait]
impl VocabularySource for MockVocabulary {
    async fn sample(
        &self,
        category: StoryDataCategory,
        story_type: StoryType,
        rng: &dyn RandomSource,
    ) -> JokegenResult<String> {
        self.draws.lock().push((category, story_type));
        let pool = self.pools.get(&category).filter(|p| !p.is_empty()).ok_or_else(|| {
            VocabularyError::new(VocabularyErrorKind::EmptyPool {
                category: category.name().to_string(),
                story_type: story_type.name().to_string(),
            })
        })?;
        Ok(pool[rng.index(pool.len())].clone())
    }
}

/// Result store that counts calls and can be told to fail lookups or writes.
#[derive(Default)]
pub struct RecordingStore {
    results: Mutex<HashMap<StoryType, StoryResult>>,
    get_calls: AtomicUsize,
    put_calls: AtomicUsize,
    fail_get: bool,
    fail_put: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_get: true,
            ..Default::default()
        }
    }

    pub fn rejecting_writes() -> Self {
        Self {
            fail_put: true,
            ..Default::default()
        }
    }

    pub fn seed(&self, story_type: StoryType, result: StoryResult) {
        self.results.lock().insert(story_type, result);
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResultStore for RecordingStore {
    async fn put(&self, story_type: StoryType, result: &StoryResult) -> JokegenResult<()> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_put {
            return Err(StoreError::new(StoreErrorKind::Io("read-only filesystem".to_string())).into());
        }
        self.results.lock().insert(story_type, result.clone());
        Ok(())
    }

    async fn get_latest(&self, story_type: StoryType) -> JokegenResult<Option<StoryResult>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_get {
            return Err(StoreError::new(StoreErrorKind::Io("disk on fire".to_string())).into());
        }
        Ok(self.results.lock().get(&story_type).cloned())
    }
}

/// Vocabulary plus store behind one provider.
pub struct MockProvider {
    pub vocabulary: MockVocabulary,
    pub store: RecordingStore,
}

impl MockProvider {
    pub fn new(vocabulary: MockVocabulary, store: RecordingStore) -> Self {
        Self { vocabulary, store }
    }
}

#[async_trait]
impl VocabularySource for MockProvider {
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
impl ResultStore for MockProvider {
    async fn put(&self, story_type: StoryType, result: &StoryResult) -> JokegenResult<()> {
        self.store.put(story_type, result).await
    }

    async fn get_latest(&self, story_type: StoryType) -> JokegenResult<Option<StoryResult>> {
        self.store.get_latest(story_type).await
    }
}

#[async_trait]
impl StoryDataProvider for MockProvider {
    fn backend_name(&self) -> &'static str {
        "mock"
    }

    async fn close(&self) -> JokegenResult<()> {
        Ok(())
    }
}

/// Driver returning a canned story, or failing every call.
pub struct MockDriver {
    story: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockDriver {
    pub fn new(story: &str) -> Self {
        Self {
            story: Some(story.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            story: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().last().cloned()
    }
}

#[async_trait]
impl JokegenDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> JokegenResult<GenerateResponse> {
        let prompt = req
            .messages()
            .first()
            .map(|m| m.content().clone())
            .unwrap_or_default();
        self.prompts.lock().push(prompt);
        match &self.story {
            Some(story) => Ok(GenerateResponse::new(vec![Output::Text(story.clone())])),
            None => Err(GenerationError::new(GenerationErrorKind::Api {
                status: 500,
                message: "upstream exploded".to_string(),
            })
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-1"
    }
}
