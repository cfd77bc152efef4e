//! Result store trait.

use async_trait::async_trait;
use jokegen_core::{StoryResult, StoryType};
use jokegen_error::JokegenResult;

/// Last-value cache of generated stories, one slot per story type.
///
/// Backends may keep history internally, but `put` always replaces what
/// `get_latest` returns for that story type. Concurrent writers race with
/// last-writer-wins semantics.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Store `result` as the latest story for `story_type`.
    async fn put(&self, story_type: StoryType, result: &StoryResult) -> JokegenResult<()>;

    /// Most recent story for `story_type`, or `None` if nothing was stored.
    async fn get_latest(&self, story_type: StoryType) -> JokegenResult<Option<StoryResult>>;
}
