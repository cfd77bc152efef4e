//! Vocabulary read from a directory of text files.

use crate::pool::{draw, parse_pool, partition_path, select_pool, shared_path};
use async_trait::async_trait;
use derive_getters::Getters;
use jokegen_core::{StoryDataCategory, StoryType};
use jokegen_error::{JokegenResult, VocabularyError, VocabularyErrorKind};
use jokegen_interface::{RandomSource, VocabularySource};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Vocabulary backed by `<root>/<category>.txt` files, with optional
/// per-story-type partitions in `<root>/<story_type>/<category>.txt`.
///
/// Files are read on every draw, so edits take effect without a restart.
#[derive(Debug, Clone, Getters)]
pub struct FileVocabulary {
    /// Directory holding the vocabulary files
    root: PathBuf,
}

impl FileVocabulary {
    /// Creates a vocabulary rooted at `root`. The directory is not checked
    /// until the first draw.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read_pool(&self, relative: &str) -> Result<Option<Vec<String>>, VocabularyError> {
        read_pool_file(&self.root.join(relative)).await
    }
}

/// Read and parse one pool file. A missing file is `None`.
async fn read_pool_file(path: &Path) -> Result<Option<Vec<String>>, VocabularyError> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(Some(parse_pool(&text))),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Vocabulary file not present");
            Ok(None)
        }
        Err(e) => Err(VocabularyError::new(VocabularyErrorKind::Io(format!(
            "{}: {}",
            path.display(),
            e
        )))),
    }
}

#[async_trait]
impl VocabularySource for FileVocabulary {
    #[instrument(
        name = "vocabulary.file.sample",
        skip(self, rng),
        fields(root = %self.root.display(), category = %category, story_type = %story_type)
    )]
    async fn sample(
        &self,
        category: StoryDataCategory,
        story_type: StoryType,
        rng: &dyn RandomSource,
    ) -> JokegenResult<String> {
        let partition = self.read_pool(&partition_path(category, story_type)).await?;
        let shared = self.read_pool(&shared_path(category)).await?;
        let pool = select_pool(category, story_type, partition, shared)?;
        debug!(entries = pool.len(), "Drawing from pool");
        Ok(draw(pool, rng))
    }
}
