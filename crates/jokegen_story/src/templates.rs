//! Prompt templates, one per story type.
//!
//! Every template holds the three slots `{theme}`, `{modifier}` and
//! `{style}`, each exactly once.

use jokegen_core::StoryType;

/// Slot replaced with the theme.
pub const THEME_SLOT: &str = "{theme}";
/// Slot replaced with the optional modifier, including its leading space.
pub const MODIFIER_SLOT: &str = "{modifier}";
/// Slot replaced with the style.
pub const STYLE_SLOT: &str = "{style}";

macro_rules! template {
    ($situation:expr) => {
        concat!(
            "Describe to me a highly comical situation ",
            $situation,
            " The theme should be '{theme}'{modifier}. Write the description in the style of {style} and limit the length to 500 characters."
        )
    };
}

const MISUNDERSTANDING: &str = template!("stemming from a misunderstanding.");
const SLAPSTICK: &str =
    template!("revolving around slapstick humor, using florid language to describe the action.");
const CURSE: &str = template!("revolving around a curse.");
const CREATURE: &str = template!("revolving around a newly created mythical creature.");
const ANTI_HUMOR: &str = concat!(
    "Describe a story using antihumor. Nothing funny should happen and the story should neither acknowledge that it is not funny nor that there was the expectation of humor.",
    " The theme should be '{theme}'{modifier}. Write the description in the style of {style} and limit the length to 500 characters."
);

/// The prompt template for `story_type`.
///
/// # Examples
///
/// ```
/// use jokegen_core::StoryType;
/// use jokegen_story::get_prompt;
///
/// let template = get_prompt(StoryType::Curse);
/// assert!(template.contains("curse"));
/// assert!(template.contains("{theme}"));
/// ```
pub fn get_prompt(story_type: StoryType) -> &'static str {
    match story_type {
        StoryType::Misunderstanding => MISUNDERSTANDING,
        StoryType::Slapstick => SLAPSTICK,
        StoryType::Curse => CURSE,
        StoryType::Creature => CREATURE,
        StoryType::AntiHumor => ANTI_HUMOR,
    }
}

/// Substitute the three slots of `template` in a single pass.
///
/// Slot text that appears inside a substituted value is left alone.
/// Braces that do not form a known slot are copied through.
///
/// # Examples
///
/// ```
/// use jokegen_story::fill_template;
///
/// let prompt = fill_template("'{theme}'{modifier} as {style}", "{style}", "", "a sonnet");
/// assert_eq!(prompt, "'{style}' as a sonnet");
/// ```
pub fn fill_template(template: &str, theme: &str, modifier: &str, style: &str) -> String {
    let mut out = String::with_capacity(template.len() + theme.len() + modifier.len() + style.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let (value, slot_len) = if tail.starts_with(THEME_SLOT) {
            (Some(theme), THEME_SLOT.len())
        } else if tail.starts_with(MODIFIER_SLOT) {
            (Some(modifier), MODIFIER_SLOT.len())
        } else if tail.starts_with(STYLE_SLOT) {
            (Some(style), STYLE_SLOT.len())
        } else {
            (None, 1)
        };
        match value {
            Some(value) => out.push_str(value),
            None => out.push('{'),
        }
        rest = &tail[slot_len..];
    }

    out.push_str(rest);
    out
}
