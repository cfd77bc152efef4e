//! Comical short stories from an LLM.
//!
//! This crate wires the pipeline to a data backend and a text generation
//! service, and provides the `jokegen` binary:
//!
//! ```text
//! jokegen story [--type T] [--theme X] [--style X] [--modifier X] [-f] [-p] [--json]
//! jokegen serve [--bind ADDR]
//! jokegen prepare-db --database-url DB --themes F --styles F --modifiers F [--story-type T] [--reset]
//! ```

mod backend;
mod cli;
mod commands;
mod config;

pub use backend::open_provider;
pub use cli::{Cli, Commands, PrepareDbArgs, ServeArgs, StoryArgs};
pub use commands::{
    EXIT_FAILURE, EXIT_UNKNOWN_STORY_TYPE, exit_status, handle_prepare_db_command,
    handle_serve_command, handle_story_command, run,
};
pub use config::{
    BackendConfig, BackendKind, CacheConfig, DEFAULT_CONFIG_FILE, ENV_PREFIX, JokegenConfig,
    MEMORY_CACHE,
};

pub use jokegen_core::{StoryDataCategory, StoryOptions, StoryResult, StoryType};
pub use jokegen_error::{JokegenError, JokegenErrorKind, JokegenResult};
pub use jokegen_interface::{JokegenDriver, RandomSource, ResultStore, StoryDataProvider, VocabularySource};
pub use jokegen_story::{CachePolicy, StoryGenerator};
