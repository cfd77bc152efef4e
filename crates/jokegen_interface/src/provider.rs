//! Data provider trait.

use crate::{ResultStore, VocabularySource};
use async_trait::async_trait;
use jokegen_error::JokegenResult;

/// A complete data backend: vocabulary plus result store.
///
/// One implementation is chosen at startup. The process entry point owns it
/// and calls [`close`](StoryDataProvider::close) before exiting.
#[async_trait]
pub trait StoryDataProvider: VocabularySource + ResultStore {
    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;

    /// Flush and release backend resources. Calling it twice is harmless.
    async fn close(&self) -> JokegenResult<()>;
}
