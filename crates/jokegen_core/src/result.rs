//! Generated story results.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A generated story together with the prompt that produced it.
///
/// Serializes to `{"prompt": ..., "story": ..., "timestamp": ...}` with an
/// RFC 3339 timestamp, which is the shape both front ends render.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use jokegen_core::StoryResult;
///
/// let result = StoryResult::new("a prompt".to_string(), "a story".to_string(), Utc::now());
/// assert_eq!(result.story(), "a story");
///
/// let json = serde_json::to_value(&result).unwrap();
/// assert!(json.get("timestamp").is_some());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, derive_new::new,
)]
pub struct StoryResult {
    /// The prompt sent to the text generation service
    prompt: String,
    /// The story returned by the service
    story: String,
    /// When the story was generated
    timestamp: DateTime<Utc>,
}

impl StoryResult {
    /// Time elapsed between generation and `now`.
    ///
    /// Negative if the timestamp lies in the future.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::TimeDelta {
        now.signed_duration_since(self.timestamp)
    }
}
