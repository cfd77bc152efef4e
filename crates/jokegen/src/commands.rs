//! Command handlers for the jokegen binary.

use crate::backend::open_provider;
use crate::cli::{Cli, Commands, PrepareDbArgs, ServeArgs, StoryArgs};
use crate::config::JokegenConfig;
use anyhow::Context;
use jokegen_core::{StoryResult, StoryType};
use jokegen_database::{ImportOptions, SqliteDataProvider, VocabularyImporter};
use jokegen_error::JokegenError;
use jokegen_interface::{JokegenDriver, StoryDataProvider};
use jokegen_models::OpenAICompatibleClient;
use jokegen_server::{create_router, serve};
use jokegen_story::{CachePolicy, StoryGenerator};
use std::sync::Arc;
use tracing::{info, warn};

/// Exit status for an unknown story type.
pub const EXIT_UNKNOWN_STORY_TYPE: u8 = 2;
/// Exit status for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Exit status for a failed run.
pub fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<JokegenError>() {
        Some(e) if e.is_client_error() => EXIT_UNKNOWN_STORY_TYPE,
        _ => EXIT_FAILURE,
    }
}

/// Load configuration, apply command-line overrides and dispatch.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = JokegenConfig::load(cli.config.as_deref())?;
    if let Some(kind) = cli.backend {
        let backend = config.backend().clone().with_kind(kind);
        config = config.with_backend(backend);
    }

    match cli.command {
        Commands::Story(args) => handle_story_command(&config, cli.token, &args).await,
        Commands::Serve(args) => handle_serve_command(&config, cli.token, &args).await,
        Commands::PrepareDb(args) => handle_prepare_db_command(&config, &args).await,
    }
}

/// Build the generator around an already opened provider.
fn build_generator(
    policy: CachePolicy,
    driver: Arc<dyn JokegenDriver>,
    provider: Arc<dyn StoryDataProvider>,
) -> StoryGenerator {
    StoryGenerator::new(provider, driver).with_cache_policy(policy)
}

fn build_driver(config: &JokegenConfig, token: Option<String>) -> anyhow::Result<Arc<dyn JokegenDriver>> {
    let client = OpenAICompatibleClient::from_config(config.model(), token)
        .map_err(JokegenError::from)?;
    Ok(Arc::new(client))
}

/// Close `provider`, logging rather than failing so the command's own
/// outcome is what gets reported.
async fn close_provider(provider: &dyn StoryDataProvider) {
    if let Err(e) = provider.close().await {
        warn!(backend = provider.backend_name(), error = %e, "Failed to close data backend");
    }
}

/// Handle the `story` command.
pub async fn handle_story_command(
    config: &JokegenConfig,
    token: Option<String>,
    args: &StoryArgs,
) -> anyhow::Result<()> {
    let story_type = StoryType::parse(args.story_type_name()).map_err(JokegenError::from)?;
    let policy = config.cache().policy().map_err(JokegenError::from)?;
    let driver = build_driver(config, token)?;
    let provider = open_provider(config.backend())?;
    let generator = build_generator(policy, driver, provider.clone());

    let outcome = generator.generate_story(story_type, &args.options()).await;
    close_provider(provider.as_ref()).await;

    print_story(&outcome?, args)
}

fn print_story(result: &StoryResult, args: &StoryArgs) -> anyhow::Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }
    if args.show_prompt {
        println!("Prompt: {}\n", result.prompt());
    }
    println!("{}", result.story());
    Ok(())
}

/// Handle the `serve` command.
pub async fn handle_serve_command(
    config: &JokegenConfig,
    token: Option<String>,
    args: &ServeArgs,
) -> anyhow::Result<()> {
    let bind = args
        .bind
        .clone()
        .unwrap_or_else(|| config.server().bind().clone());
    let policy = config.cache().policy().map_err(JokegenError::from)?;
    let driver = build_driver(config, token)?;
    let provider = open_provider(config.backend())?;
    let generator = Arc::new(build_generator(policy, driver, provider.clone()));

    let outcome = async {
        let listener = tokio::net::TcpListener::bind(&bind)
            .await
            .with_context(|| format!("Failed to bind {}", bind))?;
        info!(%bind, backend = provider.backend_name(), "Starting story server. Press Ctrl+C to stop.");
        serve(listener, create_router(generator)).await?;
        anyhow::Ok(())
    }
    .await;

    close_provider(provider.as_ref()).await;
    outcome
}

/// Handle the `prepare-db` command.
pub async fn handle_prepare_db_command(
    config: &JokegenConfig,
    args: &PrepareDbArgs,
) -> anyhow::Result<()> {
    let database_url = args
        .database_url
        .clone()
        .unwrap_or_else(|| config.backend().database_url().clone());

    let mut options = ImportOptions::builder();
    if let Some(path) = &args.themes {
        options.themes(path.clone());
    }
    if let Some(path) = &args.styles {
        options.styles(path.clone());
    }
    if let Some(path) = &args.modifiers {
        options.modifiers(path.clone());
    }
    if let Some(story_type) = args.story_type {
        options.story_type(story_type);
    }
    let options = options.reset(args.reset).build()?;

    let provider = SqliteDataProvider::open(&database_url)?;
    let outcome = VocabularyImporter::new(provider.clone())
        .import(&options)
        .await;
    close_provider(&provider).await;

    let report = outcome?;
    for (category, count) in report.inserted() {
        println!("Imported {} {} entries", count, category);
    }
    if *report.removed() > 0 {
        println!("Removed {} existing entries", report.removed());
    }
    info!(database = %database_url, total = report.total_inserted(), "Database prepared");
    Ok(())
}
