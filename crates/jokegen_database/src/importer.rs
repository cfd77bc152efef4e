//! Bulk import of vocabulary files into the database.

use crate::models::NewVocabularyRow;
use crate::provider::SqliteDataProvider;
use crate::schema::vocabulary;
use chrono::Utc;
use derive_getters::Getters;
use diesel::prelude::*;
use jokegen_core::{StoryDataCategory, StoryType};
use jokegen_error::{JokegenResult, StoreError, VocabularyError, VocabularyErrorKind};
use jokegen_storage::parse_pool;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// What to import and where it goes.
///
/// # Examples
///
/// ```
/// use jokegen_core::StoryType;
/// use jokegen_database::ImportOptionsBuilder;
///
/// let options = ImportOptionsBuilder::default()
///     .themes("res/themes.txt")
///     .story_type(StoryType::Slapstick)
///     .reset(true)
///     .build()
///     .unwrap();
/// assert!(options.styles().is_none());
/// ```
#[derive(Debug, Clone, Default, Getters, derive_builder::Builder)]
#[builder(default, setter(into))]
pub struct ImportOptions {
    /// Line-delimited theme file
    #[builder(setter(into, strip_option))]
    themes: Option<PathBuf>,
    /// Line-delimited style file
    #[builder(setter(into, strip_option))]
    styles: Option<PathBuf>,
    /// Line-delimited modifier file
    #[builder(setter(into, strip_option))]
    modifiers: Option<PathBuf>,
    /// Partition to import into; `None` imports into the shared pools
    #[builder(setter(into, strip_option))]
    story_type: Option<StoryType>,
    /// Delete every existing vocabulary row first
    reset: bool,
}

impl ImportOptions {
    /// Returns a builder for constructing ImportOptions.
    pub fn builder() -> ImportOptionsBuilder {
        ImportOptionsBuilder::default()
    }

    fn sources(&self) -> impl Iterator<Item = (StoryDataCategory, &Path)> {
        [
            (StoryDataCategory::Theme, self.themes.as_deref()),
            (StoryDataCategory::Style, self.styles.as_deref()),
            (StoryDataCategory::Modifier, self.modifiers.as_deref()),
        ]
        .into_iter()
        .filter_map(|(category, path)| path.map(|p| (category, p)))
    }
}

/// Rows inserted per category by one import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct ImportReport {
    /// Rows deleted by a reset
    removed: usize,
    /// Inserted rows per category
    inserted: BTreeMap<StoryDataCategory, usize>,
}

impl ImportReport {
    /// Rows inserted for `category`.
    pub fn inserted_for(&self, category: StoryDataCategory) -> usize {
        self.inserted.get(&category).copied().unwrap_or(0)
    }

    /// Rows inserted across all categories.
    pub fn total_inserted(&self) -> usize {
        self.inserted.values().sum()
    }
}

/// Loads vocabulary files into a [`SqliteDataProvider`].
#[derive(Debug, Clone)]
pub struct VocabularyImporter {
    provider: SqliteDataProvider,
}

impl VocabularyImporter {
    /// Import into the database behind `provider`.
    pub fn new(provider: SqliteDataProvider) -> Self {
        Self { provider }
    }

    /// Read every configured file and insert its entries in one transaction.
    ///
    /// Files use the same line format as the file backend: blank lines and
    /// `#` comments are skipped.
    ///
    /// # Errors
    ///
    /// Returns a vocabulary error if a file cannot be read, or a store error
    /// if the transaction fails. Nothing is written in either case.
    #[instrument(
        name = "database.import_vocabulary",
        skip(self, options),
        fields(story_type = ?options.story_type(), reset = options.reset())
    )]
    pub async fn import(&self, options: &ImportOptions) -> JokegenResult<ImportReport> {
        let mut batches = Vec::new();
        for (category, path) in options.sources() {
            let text = tokio::fs::read_to_string(path).await.map_err(|e| {
                VocabularyError::new(VocabularyErrorKind::Io(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            })?;
            batches.push((category, parse_pool(&text)));
        }

        let story_type = options.story_type().map(|t| t.name().to_string());
        let reset = *options.reset();
        let now = Utc::now().naive_utc();

        let report = self
            .provider
            .run(move |conn| {
                let report = conn
                    .transaction(|conn| {
                        let mut report = ImportReport::default();
                        if reset {
                            report.removed = diesel::delete(vocabulary::table).execute(conn)?;
                        }
                        for (category, entries) in batches {
                            let rows: Vec<NewVocabularyRow> = entries
                                .into_iter()
                                .map(|value| {
                                    NewVocabularyRow::new(
                                        category.name().to_string(),
                                        story_type.clone(),
                                        value,
                                        now,
                                    )
                                })
                                .collect();
                            if rows.is_empty() {
                                report.inserted.entry(category).or_insert(0);
                                continue;
                            }
                            let inserted = diesel::insert_into(vocabulary::table)
                                .values(&rows)
                                .execute(conn)?;
                            *report.inserted.entry(category).or_insert(0) += inserted;
                        }
                        Ok::<_, diesel::result::Error>(report)
                    })
                    .map_err(StoreError::from)?;
                Ok(report)
            })
            .await?;

        info!(
            removed = report.removed,
            inserted = report.total_inserted(),
            "Vocabulary imported"
        );
        Ok(report)
    }
}
