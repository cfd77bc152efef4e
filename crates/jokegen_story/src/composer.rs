//! Prompt composition.

use crate::templates::{fill_template, get_prompt};
use jokegen_core::{StoryDataCategory, StoryOptions, StoryType};
use jokegen_error::JokegenResult;
use jokegen_interface::{RandomSource, VocabularySource};
use tracing::{debug, instrument};

/// Probability that a random modifier is added when none was supplied.
pub const MODIFIER_PROBABILITY: f64 = 0.5;

/// Build the prompt for `story_type`.
///
/// Slots are resolved independently, in the order theme, style, modifier:
///
/// - theme and style use the literal override when present, otherwise one
///   draw from `vocabulary`;
/// - modifier uses the literal override when present, otherwise flips a coin
///   and draws from `vocabulary` on heads, leaving the slot empty on tails.
///
/// A present modifier is prefixed with a single space so the template reads
/// correctly either way.
///
/// # Errors
///
/// Propagates the vocabulary error of the first draw that fails.
#[instrument(
    name = "story.compose_prompt",
    skip(options, vocabulary, rng),
    fields(story_type = %story_type)
)]
pub async fn compose_prompt<V>(
    story_type: StoryType,
    options: &StoryOptions,
    vocabulary: &V,
    rng: &dyn RandomSource,
) -> JokegenResult<String>
where
    V: VocabularySource + ?Sized,
{
    let template = get_prompt(story_type);

    let theme = match options.theme() {
        Some(theme) => theme.to_string(),
        None => {
            vocabulary
                .sample(StoryDataCategory::Theme, story_type, rng)
                .await?
        }
    };

    let style = match options.style() {
        Some(style) => style.to_string(),
        None => {
            vocabulary
                .sample(StoryDataCategory::Style, story_type, rng)
                .await?
        }
    };

    let modifier = match options.modifier() {
        Some(modifier) => Some(modifier.to_string()),
        None if rng.chance(MODIFIER_PROBABILITY) => Some(
            vocabulary
                .sample(StoryDataCategory::Modifier, story_type, rng)
                .await?,
        ),
        None => None,
    };
    let modifier = modifier.map(|m| format!(" {m}")).unwrap_or_default();

    debug!(
        theme = %theme,
        style = %style,
        modifier = %modifier.trim_start(),
        "Resolved prompt slots"
    );

    Ok(fill_template(template, &theme, &modifier, &style))
}
