//! Orchestrator tests against mock collaborators.

mod test_utils;

use chrono::{TimeDelta, Utc};
use jokegen_core::{StoryDataCategory, StoryOptions, StoryResult, StoryType};
use jokegen_error::JokegenErrorKind;
use jokegen_interface::{JokegenDriver, ResultStore, StoryDataProvider};
use jokegen_story::StoryGenerator;
use std::sync::Arc;
use test_utils::{MockDriver, MockProvider, MockVocabulary, RecordingStore, ScriptedRandom};

struct Harness {
    provider: Arc<MockProvider>,
    driver: Arc<MockDriver>,
    rng: Arc<ScriptedRandom>,
    generator: StoryGenerator,
}

fn harness(vocabulary: MockVocabulary, driver: MockDriver, rng: ScriptedRandom) -> Harness {
    let provider = Arc::new(MockProvider::new(vocabulary, RecordingStore::new()));
    let driver = Arc::new(driver);
    let rng = Arc::new(rng);
    let generator = StoryGenerator::new(
        provider.clone() as Arc<dyn StoryDataProvider>,
        driver.clone() as Arc<dyn JokegenDriver>,
    )
    .with_random(rng.clone());
    Harness {
        provider,
        driver,
        rng,
        generator,
    }
}

#[tokio::test]
async fn test_miss_generates_and_stores() {
    let h = harness(
        MockVocabulary::simple(),
        MockDriver::new("A dragon lost its sock."),
        ScriptedRandom::default(),
    );

    let before = Utc::now();
    let result = h
        .generator
        .generate_story(StoryType::Curse, &StoryOptions::default())
        .await
        .unwrap();

    assert_eq!(result.story(), "A dragon lost its sock.");
    assert_eq!(h.driver.last_prompt().as_deref(), Some(result.prompt().as_str()));
    assert!(*result.timestamp() >= before);

    let stored = h
        .provider
        .get_latest(StoryType::Curse)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, result);
}

#[tokio::test]
async fn test_fresh_cache_is_returned_verbatim() {
    let h = harness(
        MockVocabulary::simple(),
        MockDriver::new("new story"),
        ScriptedRandom::default(),
    );
    let cached = StoryResult::new(
        "old prompt".to_string(),
        "old story".to_string(),
        Utc::now() - TimeDelta::hours(23),
    );
    h.provider.store.seed(StoryType::Slapstick, cached.clone());

    let result = h
        .generator
        .generate_story(StoryType::Slapstick, &StoryOptions::default())
        .await
        .unwrap();

    assert_eq!(result, cached);
    assert_eq!(h.driver.calls(), 0);
    assert_eq!(h.provider.store.put_calls(), 0);
    assert!(h.provider.vocabulary.draws().is_empty());
}

#[tokio::test]
async fn test_stale_cache_is_replaced() {
    let h = harness(
        MockVocabulary::simple(),
        MockDriver::new("new story"),
        ScriptedRandom::default(),
    );
    h.provider.store.seed(
        StoryType::Slapstick,
        StoryResult::new(
            "old".to_string(),
            "old".to_string(),
            Utc::now() - TimeDelta::hours(25),
        ),
    );

    let result = h
        .generator
        .generate_story(StoryType::Slapstick, &StoryOptions::default())
        .await
        .unwrap();

    assert_eq!(result.story(), "new story");
    assert_eq!(h.driver.calls(), 1);
    assert_eq!(h.provider.store.put_calls(), 1);
}

#[tokio::test]
async fn test_force_ignores_cache_without_reading_it() {
    let h = harness(
        MockVocabulary::simple(),
        MockDriver::new("forced story"),
        ScriptedRandom::default(),
    );
    h.provider.store.seed(
        StoryType::Curse,
        StoryResult::new("p".to_string(), "s".to_string(), Utc::now()),
    );

    let options = StoryOptions::default().with_force_regenerate(true);
    let result = h
        .generator
        .generate_story(StoryType::Curse, &options)
        .await
        .unwrap();

    assert_eq!(result.story(), "forced story");
    assert_eq!(h.provider.store.get_calls(), 0);
    assert_eq!(h.provider.store.put_calls(), 1);
}

#[tokio::test]
async fn test_all_overrides_make_no_other_draws() {
    let h = harness(
        MockVocabulary::simple(),
        MockDriver::new("Arr."),
        ScriptedRandom::default(),
    );
    let options = StoryOptions::default()
        .with_theme("pirates")
        .with_style("a haiku")
        .with_modifier("and it is spicy")
        .with_force_regenerate(true);

    let result = h
        .generator
        .generate_story(StoryType::Curse, &options)
        .await
        .unwrap();

    assert!(result.prompt().contains("'pirates' and it is spicy."));
    assert!(result.prompt().contains("style of a haiku"));
    assert!(h.provider.vocabulary.draws().is_empty());
    assert_eq!(h.rng.chance_calls(), 0);
    assert_eq!(h.rng.index_calls(), 0);
}

#[tokio::test]
async fn test_vocabulary_failure_skips_driver_and_store() {
    let vocabulary = MockVocabulary::new().with_pool(StoryDataCategory::Theme, &["dragons"]);
    let h = harness(vocabulary, MockDriver::new("unused"), ScriptedRandom::default());

    let err = h
        .generator
        .generate_story(StoryType::Creature, &StoryOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        JokegenErrorKind::VocabularyUnavailable(_)
    ));
    assert_eq!(h.driver.calls(), 0);
    assert_eq!(h.provider.store.put_calls(), 0);
}

#[tokio::test]
async fn test_driver_failure_stores_nothing() {
    let h = harness(
        MockVocabulary::simple(),
        MockDriver::failing(),
        ScriptedRandom::default(),
    );

    let err = h
        .generator
        .generate_story(StoryType::Misunderstanding, &StoryOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), JokegenErrorKind::Generation(_)));
    assert_eq!(h.driver.calls(), 1);
    assert_eq!(h.provider.store.put_calls(), 0);
    assert!(
        h.provider
            .get_latest(StoryType::Misunderstanding)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_store_failure_discards_story() {
    let provider = Arc::new(MockProvider::new(
        MockVocabulary::simple(),
        RecordingStore::rejecting_writes(),
    ));
    let driver = Arc::new(MockDriver::new("never seen"));
    let generator = StoryGenerator::new(provider.clone(), driver.clone())
        .with_random(Arc::new(ScriptedRandom::default()));

    let err = generator
        .generate_story(StoryType::Slapstick, &StoryOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), JokegenErrorKind::Store(_)));
    assert!(!err.to_string().contains("never seen"));
    assert_eq!(driver.calls(), 1);
    assert_eq!(provider.store.put_calls(), 1);
    assert!(
        provider
            .get_latest(StoryType::Slapstick)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_literal_theme_and_modifier_draw_only_style() {
    let vocabulary = MockVocabulary::new()
        .with_pool(StoryDataCategory::Theme, &["dragons"])
        .with_pool(StoryDataCategory::Style, &["haiku"])
        .with_pool(StoryDataCategory::Modifier, &["and a lost sock"]);
    let h = harness(vocabulary, MockDriver::new("Arr."), ScriptedRandom::default());
    let options = StoryOptions::default()
        .with_theme("pirates")
        .with_style("")
        .with_modifier("spicy");

    let result = h
        .generator
        .generate_story(StoryType::Misunderstanding, &options)
        .await
        .unwrap();

    let prompt = result.prompt();
    assert!(prompt.contains("pirates"));
    assert!(prompt.contains("spicy"));
    assert!(prompt.contains("haiku"));
    assert!(!prompt.contains("dragons"));
    assert!(!prompt.contains("lost sock"));
    assert_eq!(
        h.provider.vocabulary.draws(),
        vec![(StoryDataCategory::Style, StoryType::Misunderstanding)]
    );
    assert_eq!(h.rng.chance_calls(), 0);
    assert_eq!(h.rng.index_calls(), 1);
}

#[tokio::test]
async fn test_lookup_failure_still_generates() {
    let provider = Arc::new(MockProvider::new(
        MockVocabulary::simple(),
        RecordingStore::failing(),
    ));
    let driver = Arc::new(MockDriver::new("despite it all"));
    let generator = StoryGenerator::new(provider.clone(), driver.clone())
        .with_random(Arc::new(ScriptedRandom::default()));

    let result = generator
        .generate_story(StoryType::AntiHumor, &StoryOptions::default())
        .await
        .unwrap();

    assert_eq!(result.story(), "despite it all");
    assert_eq!(provider.store.put_calls(), 1);
}

#[tokio::test]
async fn test_unknown_story_type_does_no_work() {
    let h = harness(
        MockVocabulary::simple(),
        MockDriver::new("unused"),
        ScriptedRandom::default(),
    );

    let err = h
        .generator
        .parse_and_generate("grumble", &StoryOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_client_error());
    assert!(matches!(err.kind(), JokegenErrorKind::UnknownStoryType(_)));
    assert_eq!(h.provider.store.get_calls(), 0);
    assert_eq!(h.driver.calls(), 0);
}

#[tokio::test]
async fn test_parse_is_case_insensitive() {
    let h = harness(
        MockVocabulary::simple(),
        MockDriver::new("ok"),
        ScriptedRandom::default(),
    );

    h.generator
        .parse_and_generate(" AntiHumor ", &StoryOptions::default())
        .await
        .unwrap();

    assert!(
        h.provider
            .get_latest(StoryType::AntiHumor)
            .await
            .unwrap()
            .is_some()
    );
}
