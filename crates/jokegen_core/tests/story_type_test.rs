//! Tests for story type parsing and naming.

use jokegen_core::{StoryDataCategory, StoryType};
use std::collections::HashSet;

#[test]
fn test_parse_every_canonical_name() {
    for story_type in StoryType::ALL {
        let parsed = StoryType::parse(story_type.name()).expect("canonical name parses");
        assert_eq!(parsed, story_type);
    }
}

#[test]
fn test_names_are_unique() {
    let names: HashSet<&str> = StoryType::ALL.iter().map(|t| t.name()).collect();
    assert_eq!(names.len(), StoryType::ALL.len());
}

#[test]
fn test_parse_ignores_case_and_whitespace() {
    assert_eq!(StoryType::parse("  AntiHumor ").unwrap(), StoryType::AntiHumor);
    assert_eq!(StoryType::parse("CURSE").unwrap(), StoryType::Curse);
}

#[test]
fn test_parse_unknown_story_type() {
    let err = StoryType::parse("grumble").unwrap_err();
    assert_eq!(err.input, "grumble");

    assert!(StoryType::parse("").is_err());
    assert!(StoryType::parse("anti humor").is_err());
}

#[test]
fn test_display_matches_serde() {
    for story_type in StoryType::ALL {
        let json = serde_json::to_string(&story_type).unwrap();
        assert_eq!(json, format!("\"{}\"", story_type));
    }
}

#[test]
fn test_default_story_type() {
    assert_eq!(StoryType::default(), StoryType::Misunderstanding);
}

#[test]
fn test_category_names() {
    let names: Vec<&str> = StoryDataCategory::ALL.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["theme", "style", "modifier"]);
    assert_eq!(StoryDataCategory::Style.file_stem(), "styles");
}
