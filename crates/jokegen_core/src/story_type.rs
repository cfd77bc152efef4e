//! Story types and their canonical names.

use jokegen_error::StoryTypeError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which prompt template and vocabulary partition a story uses.
///
/// The set is fixed at build time. Every variant has exactly one canonical
/// lowercase name, and parsing anything else is an error.
///
/// # Examples
///
/// ```
/// use jokegen_core::StoryType;
///
/// let story_type: StoryType = "Slapstick".parse().unwrap();
/// assert_eq!(story_type, StoryType::Slapstick);
/// assert_eq!(story_type.to_string(), "slapstick");
/// assert!("grumble".parse::<StoryType>().is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::AsRefStr,
    strum::Display,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoryType {
    /// Comedy stemming from a misunderstanding
    #[default]
    Misunderstanding,
    /// Slapstick humor told in florid language
    Slapstick,
    /// A situation revolving around a curse
    Curse,
    /// A newly created mythical creature
    Creature,
    /// A story where nothing funny happens
    AntiHumor,
}

impl StoryType {
    /// Every story type, in declaration order.
    pub const ALL: [StoryType; 5] = [
        StoryType::Misunderstanding,
        StoryType::Slapstick,
        StoryType::Curse,
        StoryType::Creature,
        StoryType::AntiHumor,
    ];

    /// Canonical name used in files, URLs and database rows.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Parse a story type name.
    ///
    /// Surrounding whitespace is ignored and matching is ASCII
    /// case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`StoryTypeError`] if the name matches no story type.
    #[track_caller]
    pub fn parse(input: &str) -> Result<Self, StoryTypeError> {
        let trimmed = input.trim();
        Self::ALL
            .into_iter()
            .find(|story_type| story_type.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| StoryTypeError::new(input))
    }
}

impl FromStr for StoryType {
    type Err = StoryTypeError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
