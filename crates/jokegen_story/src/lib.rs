//! Story generation pipeline for jokegen.
//!
//! - [`get_prompt`] and [`fill_template`]: per-type prompt templates
//! - [`compose_prompt`]: fills a template from overrides and vocabulary draws
//! - [`CachePolicy`]: decides when a stored story is reused
//! - [`StoryGenerator`]: ties the above to a data backend and a driver

mod cache;
mod composer;
mod generator;
mod templates;

pub use cache::{CacheDecision, CachePolicy, DEFAULT_CACHE_WINDOW_HOURS, RegenerateReason};
pub use composer::{MODIFIER_PROBABILITY, compose_prompt};
pub use generator::StoryGenerator;
pub use templates::{MODIFIER_SLOT, STYLE_SLOT, THEME_SLOT, fill_template, get_prompt};
