//! Time-based reuse of previously generated stories.

use chrono::{DateTime, TimeDelta, Utc};
use derive_getters::Getters;
use jokegen_core::{StoryResult, StoryType};
use jokegen_interface::ResultStore;
use tracing::{debug, instrument, warn};

/// Default period during which a stored story is reused.
pub const DEFAULT_CACHE_WINDOW_HOURS: i64 = 24;

/// Why a story has to be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RegenerateReason {
    /// The caller asked for a fresh story
    #[display("forced")]
    Forced,
    /// No story stored for this type
    #[display("missing")]
    Missing,
    /// The store could not be read
    #[display("lookup failed")]
    LookupFailed,
    /// The stored story is outside the cache window
    #[display("stale")]
    Stale,
}

/// Outcome of the cache check for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheDecision {
    /// Return the stored story unchanged
    Reuse(StoryResult),
    /// Compose, generate and store a new story
    Regenerate(RegenerateReason),
}

/// Decides whether a stored story is reused.
///
/// Staleness is binary: a story younger than the window is reused verbatim,
/// anything else is regenerated.
///
/// # Examples
///
/// ```
/// use chrono::{TimeDelta, Utc};
/// use jokegen_core::StoryResult;
/// use jokegen_story::{CacheDecision, CachePolicy, RegenerateReason};
///
/// let policy = CachePolicy::default();
/// let now = Utc::now();
/// let cached = StoryResult::new("p".into(), "s".into(), now - TimeDelta::hours(25));
///
/// assert_eq!(
///     policy.decide(false, now, Some(cached)),
///     CacheDecision::Regenerate(RegenerateReason::Stale)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct CachePolicy {
    /// Maximum age of a reusable story
    window: TimeDelta,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::new(TimeDelta::hours(DEFAULT_CACHE_WINDOW_HOURS))
    }
}

impl CachePolicy {
    /// Creates a policy with the given cache window.
    pub fn new(window: TimeDelta) -> Self {
        Self { window }
    }

    /// Whether a story generated at `result.timestamp()` is still fresh at `now`.
    pub fn is_fresh(&self, result: &StoryResult, now: DateTime<Utc>) -> bool {
        result.age(now) < self.window
    }

    /// Pure decision given what the store returned.
    pub fn decide(
        &self,
        force_regenerate: bool,
        now: DateTime<Utc>,
        cached: Option<StoryResult>,
    ) -> CacheDecision {
        if force_regenerate {
            return CacheDecision::Regenerate(RegenerateReason::Forced);
        }
        match cached {
            None => CacheDecision::Regenerate(RegenerateReason::Missing),
            Some(result) if self.is_fresh(&result, now) => CacheDecision::Reuse(result),
            Some(_) => CacheDecision::Regenerate(RegenerateReason::Stale),
        }
    }

    /// Consult `store` and decide.
    ///
    /// The store is not touched when `force_regenerate` is set. A failed
    /// lookup is logged and treated as a miss.
    #[instrument(
        name = "story.cache_check",
        skip(self, store),
        fields(story_type = %story_type, window_hours = self.window.num_hours())
    )]
    pub async fn check<S>(
        &self,
        story_type: StoryType,
        force_regenerate: bool,
        now: DateTime<Utc>,
        store: &S,
    ) -> CacheDecision
    where
        S: ResultStore + ?Sized,
    {
        if force_regenerate {
            debug!("Forced regeneration, skipping store lookup");
            return CacheDecision::Regenerate(RegenerateReason::Forced);
        }

        match store.get_latest(story_type).await {
            Ok(cached) => {
                let decision = self.decide(false, now, cached);
                debug!(reuse = matches!(decision, CacheDecision::Reuse(_)), "Cache checked");
                decision
            }
            Err(e) => {
                // Absence and backend failure look the same to the caller.
                warn!(error = %e, "Cached story lookup failed, regenerating");
                CacheDecision::Regenerate(RegenerateReason::LookupFailed)
            }
        }
    }
}
