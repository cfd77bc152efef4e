//! Diesel row types.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use jokegen_core::StoryResult;

/// Database row for the stories table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, derive_getters::Getters)]
#[diesel(table_name = crate::schema::stories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StoryRow {
    id: i32,
    story_type: String,
    prompt: String,
    story: String,
    created_at: NaiveDateTime,
}

impl From<StoryRow> for StoryResult {
    fn from(row: StoryRow) -> Self {
        StoryResult::new(row.prompt, row.story, row.created_at.and_utc())
    }
}

/// Insertable struct for recording a generated story.
#[derive(Debug, Clone, Insertable, derive_builder::Builder)]
#[diesel(table_name = crate::schema::stories)]
#[builder(setter(into))]
pub struct NewStoryRow {
    story_type: String,
    prompt: String,
    story: String,
    created_at: NaiveDateTime,
}

/// Database row for the vocabulary table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, derive_getters::Getters)]
#[diesel(table_name = crate::schema::vocabulary)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VocabularyRow {
    id: i32,
    category: String,
    story_type: Option<String>,
    value: String,
    created_at: NaiveDateTime,
}

/// Insertable struct for one vocabulary entry.
///
/// A `None` story type puts the entry in the shared pool.
#[derive(Debug, Clone, Insertable, derive_new::new)]
#[diesel(table_name = crate::schema::vocabulary)]
pub struct NewVocabularyRow {
    category: String,
    story_type: Option<String>,
    value: String,
    created_at: NaiveDateTime,
}
