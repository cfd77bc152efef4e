//! Command-line interface.

use crate::config::BackendKind;
use clap::{Args, Parser, Subcommand};
use jokegen_core::{StoryOptions, StoryType};
use jokegen_error::StoryTypeError;
use std::path::PathBuf;

/// Generate comical short stories with an LLM.
#[derive(Parser, Debug)]
#[command(name = "jokegen")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API key for the text generation service
    #[arg(long, global = true, env = "OPEN_AI_API_KEY", hide_env_values = true)]
    pub token: Option<String>,

    /// Data backend, overriding the configuration file
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendKind>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a story, reusing the cached one when it is recent
    Story(StoryArgs),
    /// Serve stories over HTTP
    Serve(ServeArgs),
    /// Import vocabulary files into a SQLite database
    PrepareDb(PrepareDbArgs),
}

/// Arguments of `jokegen story`.
#[derive(Args, Debug, Default)]
pub struct StoryArgs {
    /// Story type: misunderstanding, slapstick, curse, creature or antihumor
    #[arg(short = 't', long = "type")]
    pub story_type: Option<String>,

    /// Literal theme instead of a random one
    #[arg(long)]
    pub theme: Option<String>,

    /// Literal style instead of a random one
    #[arg(long)]
    pub style: Option<String>,

    /// Literal modifier instead of the random coin flip
    #[arg(long)]
    pub modifier: Option<String>,

    /// Ignore the cached story
    #[arg(short = 'f', long)]
    pub force_regenerate: bool,

    /// Print the prompt before the story
    #[arg(short = 'p', long)]
    pub show_prompt: bool,

    /// Print the full result as JSON
    #[arg(long, conflicts_with = "show_prompt")]
    pub json: bool,
}

impl StoryArgs {
    /// Requested story type name, or the default type.
    pub fn story_type_name(&self) -> &str {
        self.story_type
            .as_deref()
            .unwrap_or(StoryType::default().name())
    }

    /// Overrides for the generator.
    pub fn options(&self) -> StoryOptions {
        let mut options = StoryOptions::default().with_force_regenerate(self.force_regenerate);
        if let Some(theme) = &self.theme {
            options = options.with_theme(theme.as_str());
        }
        if let Some(style) = &self.style {
            options = options.with_style(style.as_str());
        }
        if let Some(modifier) = &self.modifier {
            options = options.with_modifier(modifier.as_str());
        }
        options
    }
}

/// Arguments of `jokegen serve`.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Socket address to listen on, overriding the configuration file
    #[arg(long)]
    pub bind: Option<String>,
}

/// Arguments of `jokegen prepare-db`.
#[derive(Args, Debug, Default)]
pub struct PrepareDbArgs {
    /// SQLite database path, overriding the configuration file
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Line-delimited theme file
    #[arg(long)]
    pub themes: Option<PathBuf>,

    /// Line-delimited style file
    #[arg(long)]
    pub styles: Option<PathBuf>,

    /// Line-delimited modifier file
    #[arg(long)]
    pub modifiers: Option<PathBuf>,

    /// Import into this story type's pools instead of the shared ones
    #[arg(long, value_parser = parse_story_type)]
    pub story_type: Option<StoryType>,

    /// Delete existing vocabulary before importing
    #[arg(long)]
    pub reset: bool,
}

fn parse_story_type(value: &str) -> Result<StoryType, StoryTypeError> {
    StoryType::parse(value)
}
