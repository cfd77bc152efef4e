//! Line-delimited vocabulary pools.

use jokegen_core::{StoryDataCategory, StoryType};
use jokegen_error::{VocabularyError, VocabularyErrorKind};
use jokegen_interface::RandomSource;

/// Parse a vocabulary resource into entries.
///
/// One entry per line. Surrounding whitespace is trimmed; blank lines and
/// lines starting with `#` are skipped.
///
/// # Examples
///
/// ```
/// use jokegen_storage::parse_pool;
///
/// let pool = parse_pool("# nouns\nteapot\n\n  walrus  \r\n");
/// assert_eq!(pool, vec!["teapot", "walrus"]);
/// ```
pub fn parse_pool(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Relative path of the shared pool for `category`.
pub fn shared_path(category: StoryDataCategory) -> String {
    format!("{}.txt", category.file_stem())
}

/// Relative path of the `story_type` partition pool for `category`.
pub fn partition_path(category: StoryDataCategory, story_type: StoryType) -> String {
    format!("{}/{}.txt", story_type.name(), category.file_stem())
}

/// Pick the partition pool when it has entries, else the shared pool.
///
/// # Errors
///
/// [`VocabularyErrorKind::EmptyPool`] when neither pool has entries.
#[track_caller]
pub(crate) fn select_pool(
    category: StoryDataCategory,
    story_type: StoryType,
    partition: Option<Vec<String>>,
    shared: Option<Vec<String>>,
) -> Result<Vec<String>, VocabularyError> {
    partition
        .filter(|pool| !pool.is_empty())
        .or_else(|| shared.filter(|pool| !pool.is_empty()))
        .ok_or_else(|| empty_pool(category, story_type))
}

/// Uniform draw from a pool already checked by [`select_pool`].
pub(crate) fn draw(mut pool: Vec<String>, rng: &dyn RandomSource) -> String {
    let index = rng.index(pool.len()).min(pool.len() - 1);
    pool.swap_remove(index)
}

#[track_caller]
pub(crate) fn empty_pool(category: StoryDataCategory, story_type: StoryType) -> VocabularyError {
    VocabularyError::new(VocabularyErrorKind::EmptyPool {
        category: category.name().to_string(),
        story_type: story_type.name().to_string(),
    })
}
