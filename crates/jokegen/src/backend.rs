//! Choosing and opening the data backend.

use crate::config::{BackendConfig, BackendKind};
use jokegen_database::SqliteDataProvider;
use jokegen_error::JokegenResult;
use jokegen_interface::StoryDataProvider;
use jokegen_storage::{
    CompositeDataProvider, DEFAULT_CACHE_FILE, EmbeddedVocabulary, FileVocabulary,
    InMemoryResultStore, JsonResultStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Open the backend described by `config`.
///
/// The caller owns the returned provider and must
/// [`close`](StoryDataProvider::close) it before exiting.
///
/// # Errors
///
/// Returns a store error if the SQLite database cannot be opened or
/// migrated. The file and embedded backends defer all I/O to first use.
#[instrument(name = "backend.open", skip(config), fields(kind = ?config.kind()))]
pub fn open_provider(config: &BackendConfig) -> JokegenResult<Arc<dyn StoryDataProvider>> {
    let provider: Arc<dyn StoryDataProvider> = match config.kind() {
        BackendKind::File => {
            let cache_file = config
                .cache_file()
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_FILE));
            info!(
                resources = %config.resources_dir().display(),
                cache = %cache_file.display(),
                "Using file backend"
            );
            Arc::new(CompositeDataProvider::new(
                "file",
                FileVocabulary::new(config.resources_dir()),
                JsonResultStore::new(cache_file),
            ))
        }
        BackendKind::Embedded => match config.cache_file() {
            Some(cache_file) => {
                info!(cache = %cache_file.display(), "Using embedded backend");
                Arc::new(CompositeDataProvider::new(
                    "embedded",
                    EmbeddedVocabulary::new(),
                    JsonResultStore::new(cache_file),
                ))
            }
            None => {
                warn!("No cache file configured, stories are cached in memory only");
                Arc::new(CompositeDataProvider::new(
                    "embedded",
                    EmbeddedVocabulary::new(),
                    InMemoryResultStore::new(),
                ))
            }
        },
        BackendKind::Sqlite => {
            info!(database = %config.database_url(), "Using SQLite backend");
            Arc::new(SqliteDataProvider::open(config.database_url())?)
        }
    };
    Ok(provider)
}
