//! Result store kept in a single JSON document.

use async_trait::async_trait;
use derive_getters::Getters;
use jokegen_core::{StoryResult, StoryType};
use jokegen_error::{JokegenResult, StoreError, StoreErrorKind};
use jokegen_interface::ResultStore;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// File name used when no cache file is configured.
pub const DEFAULT_CACHE_FILE: &str = "recent_story.json";

type Document = BTreeMap<String, StoryResult>;

/// Stores the latest result per story type in one JSON file.
///
/// The document maps story type names to results:
///
/// ```json
/// { "curse": { "prompt": "...", "story": "...", "timestamp": "2024-03-01T12:00:00Z" } }
/// ```
///
/// Every `put` rewrites the whole file through a sibling temp file and a
/// rename, so readers never see a partial document.
#[derive(Debug, Getters)]
pub struct JsonResultStore {
    /// Location of the JSON document
    path: PathBuf,
    #[getter(skip)]
    lock: Mutex<()>,
}

impl JsonResultStore {
    /// Creates a store backed by `path`. The file is created on first `put`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Document, StoreError> {
        load_document(&self.path).await
    }

    async fn save(&self, document: &Document) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(document)?;
        let tmp = temp_path(&self.path);
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| io_error(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| io_error(&self.path, e))
    }
}

async fn load_document(path: &Path) -> Result<Document, StoreError> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::new()),
        Err(e) => return Err(io_error(path, e)),
    };
    if text.trim().is_empty() {
        return Ok(Document::new());
    }
    Ok(serde_json::from_str(&text)?)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[track_caller]
fn io_error(path: &Path, e: std::io::Error) -> StoreError {
    StoreError::new(StoreErrorKind::Io(format!("{}: {}", path.display(), e)))
}

#[async_trait]
impl ResultStore for JsonResultStore {
    #[instrument(
        name = "store.json.put",
        skip(self, result),
        fields(path = %self.path.display(), story_type = %story_type)
    )]
    async fn put(&self, story_type: StoryType, result: &StoryResult) -> JokegenResult<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        document.insert(story_type.name().to_string(), result.clone());
        self.save(&document).await?;
        debug!(entries = document.len(), "Cache file written");
        Ok(())
    }

    #[instrument(
        name = "store.json.get_latest",
        skip(self),
        fields(path = %self.path.display(), story_type = %story_type)
    )]
    async fn get_latest(&self, story_type: StoryType) -> JokegenResult<Option<StoryResult>> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        Ok(document.remove(story_type.name()))
    }
}
