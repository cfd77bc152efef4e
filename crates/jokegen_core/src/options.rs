//! Caller-supplied overrides for a single generation request.

use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Literal slot values and cache control for one request.
///
/// A populated slot suppresses the random draw for that slot. Empty strings
/// count as unset, so front ends can pass raw form or flag values through.
///
/// # Examples
///
/// ```
/// use jokegen_core::StoryOptions;
///
/// let options = StoryOptions::default()
///     .with_theme("pirates")
///     .with_modifier("")
///     .with_force_regenerate(true);
///
/// assert_eq!(options.theme(), Some("pirates"));
/// assert_eq!(options.modifier(), None);
/// assert_eq!(options.style(), None);
/// assert!(options.force_regenerate());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_", into, strip_option)]
pub struct StoryOptions {
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    modifier: Option<String>,
    #[serde(default)]
    force_regenerate: bool,
}

impl StoryOptions {
    /// Literal theme, if one was supplied.
    pub fn theme(&self) -> Option<&str> {
        non_empty(&self.theme)
    }

    /// Literal style, if one was supplied.
    pub fn style(&self) -> Option<&str> {
        non_empty(&self.style)
    }

    /// Literal modifier, if one was supplied.
    pub fn modifier(&self) -> Option<&str> {
        non_empty(&self.modifier)
    }

    /// Whether the cached result must be ignored.
    pub fn force_regenerate(&self) -> bool {
        self.force_regenerate
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
