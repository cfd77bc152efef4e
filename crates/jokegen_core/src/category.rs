//! Vocabulary categories.

use serde::{Deserialize, Serialize};

/// Which vocabulary pool a draw comes from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::AsRefStr,
    strum::Display,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoryDataCategory {
    /// What the story is about
    Theme,
    /// Whose voice the story is told in
    Style,
    /// Optional extra flavor appended to the theme
    Modifier,
}

impl StoryDataCategory {
    /// Every category, in declaration order.
    pub const ALL: [StoryDataCategory; 3] = [
        StoryDataCategory::Theme,
        StoryDataCategory::Style,
        StoryDataCategory::Modifier,
    ];

    /// Canonical name used in database rows and logs.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Stem of the line-delimited resource file holding this pool.
    ///
    /// # Examples
    ///
    /// ```
    /// use jokegen_core::StoryDataCategory;
    ///
    /// assert_eq!(StoryDataCategory::Theme.file_stem(), "themes");
    /// assert_eq!(StoryDataCategory::Modifier.file_stem(), "modifiers");
    /// ```
    pub fn file_stem(&self) -> &'static str {
        match self {
            StoryDataCategory::Theme => "themes",
            StoryDataCategory::Style => "styles",
            StoryDataCategory::Modifier => "modifiers",
        }
    }
}
