//! Tests for the SQLite data backend.

use chrono::{TimeZone, Utc};
use jokegen_core::{StoryDataCategory, StoryResult, StoryType};
use jokegen_error::{JokegenErrorKind, StoreErrorKind, VocabularyErrorKind};
use jokegen_interface::{ResultStore, SeededRandom, StoryDataProvider, VocabularySource};
use jokegen_database::{
    ImportOptionsBuilder, SqliteDataProvider, VocabularyImporter, create_pool, is_in_memory,
};
use std::fs;
use tempfile::TempDir;

fn open(dir: &TempDir) -> SqliteDataProvider {
    let url = dir.path().join("jokegen.db");
    SqliteDataProvider::open(url.to_str().unwrap()).unwrap()
}

fn sample_result(story: &str, hour: u32) -> StoryResult {
    StoryResult::new(
        format!("prompt for {story}"),
        story.to_string(),
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
    )
}

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_empty_database_has_no_story() {
    let dir = TempDir::new().unwrap();
    let provider = open(&dir);
    assert!(provider.get_latest(StoryType::Curse).await.unwrap().is_none());
    assert_eq!(provider.backend_name(), "sqlite");
}

#[tokio::test]
async fn test_latest_story_wins_per_type() {
    let dir = TempDir::new().unwrap();
    let provider = open(&dir);

    provider
        .put(StoryType::Curse, &sample_result("first", 1))
        .await
        .unwrap();
    provider
        .put(StoryType::Slapstick, &sample_result("other", 2))
        .await
        .unwrap();
    provider
        .put(StoryType::Curse, &sample_result("second", 3))
        .await
        .unwrap();

    let curse = provider.get_latest(StoryType::Curse).await.unwrap().unwrap();
    assert_eq!(curse, sample_result("second", 3));
    let slapstick = provider
        .get_latest(StoryType::Slapstick)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(slapstick.story(), "other");
}

#[tokio::test]
async fn test_timestamp_round_trips_with_subseconds() {
    let dir = TempDir::new().unwrap();
    let provider = open(&dir);
    let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 15).unwrap()
        + chrono::TimeDelta::milliseconds(250);
    let result = StoryResult::new("p".to_string(), "s".to_string(), timestamp);

    provider.put(StoryType::Creature, &result).await.unwrap();

    let loaded = provider.get_latest(StoryType::Creature).await.unwrap().unwrap();
    assert_eq!(*loaded.timestamp(), timestamp);
}

#[tokio::test]
async fn test_stories_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let provider = open(&dir);
        provider
            .put(StoryType::AntiHumor, &sample_result("nothing", 4))
            .await
            .unwrap();
        provider.close().await.unwrap();
    }

    let reopened = open(&dir);
    let loaded = reopened
        .get_latest(StoryType::AntiHumor)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.story(), "nothing");
}

#[tokio::test]
async fn test_empty_vocabulary_is_empty_pool() {
    let dir = TempDir::new().unwrap();
    let provider = open(&dir);

    let err = provider
        .sample(StoryDataCategory::Theme, StoryType::Curse, &SeededRandom::new(1))
        .await
        .unwrap_err();

    match err.kind() {
        JokegenErrorKind::VocabularyUnavailable(e) => {
            assert!(matches!(e.kind, VocabularyErrorKind::EmptyPool { .. }))
        }
        other => panic!("unexpected error kind: {}", other),
    }
}

#[tokio::test]
async fn test_import_and_sample_shared_pool() {
    let dir = TempDir::new().unwrap();
    let provider = open(&dir);
    let themes = write(&dir, "themes.txt", "# nouns\nteapot\nwalrus\n\n");
    let styles = write(&dir, "styles.txt", "a sonnet\n");

    let report = VocabularyImporter::new(provider.clone())
        .import(
            &ImportOptionsBuilder::default()
                .themes(themes)
                .styles(styles)
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(report.inserted_for(StoryDataCategory::Theme), 2);
    assert_eq!(report.inserted_for(StoryDataCategory::Style), 1);
    assert_eq!(report.inserted_for(StoryDataCategory::Modifier), 0);

    let rng = SeededRandom::new(11);
    for _ in 0..20 {
        let theme = provider
            .sample(StoryDataCategory::Theme, StoryType::Slapstick, &rng)
            .await
            .unwrap();
        assert!(theme == "teapot" || theme == "walrus");
    }
}

#[tokio::test]
async fn test_partition_rows_are_preferred() {
    let dir = TempDir::new().unwrap();
    let provider = open(&dir);
    let importer = VocabularyImporter::new(provider.clone());

    let shared = write(&dir, "styles.txt", "shared style\n");
    importer
        .import(&ImportOptionsBuilder::default().styles(shared).build().unwrap())
        .await
        .unwrap();

    let slapstick = write(&dir, "slapstick_styles.txt", "silent film\n");
    importer
        .import(
            &ImportOptionsBuilder::default()
                .styles(slapstick)
                .story_type(StoryType::Slapstick)
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    let rng = SeededRandom::new(2);
    let style = provider
        .sample(StoryDataCategory::Style, StoryType::Slapstick, &rng)
        .await
        .unwrap();
    assert_eq!(style, "silent film");

    let style = provider
        .sample(StoryDataCategory::Style, StoryType::Curse, &rng)
        .await
        .unwrap();
    assert_eq!(style, "shared style");
}

#[tokio::test]
async fn test_reset_replaces_vocabulary() {
    let dir = TempDir::new().unwrap();
    let provider = open(&dir);
    let importer = VocabularyImporter::new(provider.clone());

    let old = write(&dir, "old.txt", "old theme\nanother old theme\n");
    importer
        .import(&ImportOptionsBuilder::default().themes(old).build().unwrap())
        .await
        .unwrap();

    let new = write(&dir, "new.txt", "new theme\n");
    let report = importer
        .import(
            &ImportOptionsBuilder::default()
                .themes(new)
                .reset(true)
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(*report.removed(), 2);
    let theme = provider
        .sample(StoryDataCategory::Theme, StoryType::Curse, &SeededRandom::new(0))
        .await
        .unwrap();
    assert_eq!(theme, "new theme");
}

#[tokio::test]
async fn test_missing_import_file_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let provider = open(&dir);
    let themes = write(&dir, "themes.txt", "teapot\n");

    let err = VocabularyImporter::new(provider.clone())
        .import(
            &ImportOptionsBuilder::default()
                .themes(themes)
                .styles(dir.path().join("missing.txt"))
                .build()
                .unwrap(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        JokegenErrorKind::VocabularyUnavailable(_)
    ));

    assert!(
        provider
            .sample(StoryDataCategory::Theme, StoryType::Curse, &SeededRandom::new(0))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_closed_provider_rejects_calls() {
    let dir = TempDir::new().unwrap();
    let provider = open(&dir);

    provider.close().await.unwrap();
    provider.close().await.unwrap();

    let err = provider.get_latest(StoryType::Curse).await.unwrap_err();
    match err.kind() {
        JokegenErrorKind::Store(e) => assert_eq!(e.kind, StoreErrorKind::Closed),
        other => panic!("unexpected error kind: {}", other),
    }
}

#[test]
fn test_in_memory_pool_keeps_its_only_connection() {
    assert!(is_in_memory(":memory:"));
    assert!(!is_in_memory("jokegen.db"));

    let pool = create_pool(":memory:").unwrap();
    assert_eq!(pool.max_size(), 1);
    assert_eq!(pool.max_lifetime(), None);
    assert_eq!(pool.idle_timeout(), None);
}

#[tokio::test]
async fn test_in_memory_database_keeps_stories() {
    let provider = SqliteDataProvider::open(":memory:").unwrap();
    let result = sample_result("kept", 9);

    provider.put(StoryType::Creature, &result).await.unwrap();
    provider.put(StoryType::Curse, &sample_result("other", 10)).await.unwrap();

    assert_eq!(
        provider.get_latest(StoryType::Creature).await.unwrap(),
        Some(result)
    );
}
