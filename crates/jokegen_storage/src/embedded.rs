//! Vocabulary compiled into the binary.

use crate::pool::{draw, parse_pool, partition_path, select_pool, shared_path};
use async_trait::async_trait;
use jokegen_core::{StoryDataCategory, StoryType};
use jokegen_error::JokegenResult;
use jokegen_interface::{RandomSource, VocabularySource};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Bundled resources, keyed by path relative to `res/`.
const RESOURCES: &[(&str, &str)] = &[
    ("themes.txt", include_str!("../res/themes.txt")),
    ("styles.txt", include_str!("../res/styles.txt")),
    ("modifiers.txt", include_str!("../res/modifiers.txt")),
    (
        "misunderstanding/styles.txt",
        include_str!("../res/misunderstanding/styles.txt"),
    ),
    (
        "misunderstanding/modifiers.txt",
        include_str!("../res/misunderstanding/modifiers.txt"),
    ),
    (
        "slapstick/styles.txt",
        include_str!("../res/slapstick/styles.txt"),
    ),
    (
        "slapstick/modifiers.txt",
        include_str!("../res/slapstick/modifiers.txt"),
    ),
];

/// Vocabulary from the resources shipped with the crate.
///
/// Pools are parsed once at construction. Misunderstanding and slapstick
/// stories carry their own styles and modifiers; every other story type
/// draws from the shared pools.
///
/// # Examples
///
/// ```
/// use jokegen_storage::EmbeddedVocabulary;
///
/// let vocabulary = EmbeddedVocabulary::new();
/// assert!(vocabulary.resource("themes.txt").is_some());
/// assert!(vocabulary.resource("curse/styles.txt").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct EmbeddedVocabulary {
    pools: HashMap<&'static str, Vec<String>>,
}

impl Default for EmbeddedVocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbeddedVocabulary {
    /// Parse the bundled resources.
    pub fn new() -> Self {
        let pools = RESOURCES
            .iter()
            .map(|(path, text)| (*path, parse_pool(text)))
            .collect();
        Self { pools }
    }

    /// Parsed entries of a bundled resource.
    pub fn resource(&self, path: &str) -> Option<&[String]> {
        self.pools.get(path).map(Vec::as_slice)
    }

    fn pool(&self, path: &str) -> Option<Vec<String>> {
        self.pools.get(path).cloned()
    }
}

#[async_trait]
impl VocabularySource for EmbeddedVocabulary {
    #[instrument(
        name = "vocabulary.embedded.sample",
        skip(self, rng),
        fields(category = %category, story_type = %story_type)
    )]
    async fn sample(
        &self,
        category: StoryDataCategory,
        story_type: StoryType,
        rng: &dyn RandomSource,
    ) -> JokegenResult<String> {
        let pool = select_pool(
            category,
            story_type,
            self.pool(&partition_path(category, story_type)),
            self.pool(&shared_path(category)),
        )?;
        debug!(entries = pool.len(), "Drawing from pool");
        Ok(draw(pool, rng))
    }
}
