//! SQLite-backed vocabulary and result store.

use crate::connection::{SqlitePool, create_pool, run_migrations};
use crate::models::{NewStoryRowBuilder, StoryRow};
use crate::schema::{stories, vocabulary};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use jokegen_core::{StoryDataCategory, StoryResult, StoryType};
use jokegen_error::{
    JokegenResult, StoreError, StoreErrorKind, VocabularyError, VocabularyErrorKind,
};
use jokegen_interface::{RandomSource, ResultStore, StoryDataProvider, VocabularySource};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, instrument};

/// Data backend storing vocabulary and story history in SQLite.
///
/// Every story is kept; [`get_latest`](ResultStore::get_latest) reads the
/// newest row for the story type. Diesel calls run on the blocking thread
/// pool.
#[derive(Clone)]
pub struct SqliteDataProvider {
    pool: SqlitePool,
    closed: Arc<AtomicBool>,
}

impl std::fmt::Debug for SqliteDataProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteDataProvider")
            .field("connections", &self.pool.state().connections)
            .field("closed", &self.closed.load(Ordering::SeqCst))
            .finish()
    }
}

impl SqliteDataProvider {
    /// Open the database at `database_url` and apply pending migrations.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use jokegen_database::SqliteDataProvider;
    ///
    /// let provider = SqliteDataProvider::open("jokegen.db").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a store error if the database cannot be opened or migrated.
    #[instrument(name = "database.open")]
    pub fn open(database_url: &str) -> JokegenResult<Self> {
        let pool = create_pool(database_url)?;
        let mut conn = pool
            .get()
            .map_err(|e| StoreError::new(StoreErrorKind::Connection(e.to_string())))?;
        run_migrations(&mut conn)?;
        info!("SQLite backend ready");
        Ok(Self {
            pool,
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run `op` on a pooled connection on the blocking thread pool.
    pub(crate) async fn run<T, F>(&self, op: F) -> JokegenResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> JokegenResult<T> + Send + 'static,
        T: Send + 'static,
    {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::new(StoreErrorKind::Closed).into());
        }
        let pool = self.pool.clone();
        let result = tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| StoreError::new(StoreErrorKind::Connection(e.to_string())))?;
            op(&mut conn)
        })
        .await
        .map_err(|e| StoreError::new(StoreErrorKind::Database(format!("Task join error: {}", e))))?;
        result
    }
}

/// Number of vocabulary rows in one pool. `None` selects the shared pool.
fn count_pool(
    conn: &mut SqliteConnection,
    category: &str,
    story_type: Option<&str>,
) -> QueryResult<i64> {
    let query = vocabulary::table
        .select(diesel::dsl::count_star())
        .filter(vocabulary::category.eq(category))
        .into_boxed();
    let query = match story_type {
        Some(story_type) => query.filter(vocabulary::story_type.eq(story_type)),
        None => query.filter(vocabulary::story_type.is_null()),
    };
    query.get_result(conn)
}

/// Value of the row at `offset` in one pool, ordered by id.
fn value_at(
    conn: &mut SqliteConnection,
    category: &str,
    story_type: Option<&str>,
    offset: i64,
) -> QueryResult<String> {
    let query = vocabulary::table
        .select(vocabulary::value)
        .filter(vocabulary::category.eq(category))
        .order(vocabulary::id.asc())
        .offset(offset)
        .limit(1)
        .into_boxed();
    let query = match story_type {
        Some(story_type) => query.filter(vocabulary::story_type.eq(story_type)),
        None => query.filter(vocabulary::story_type.is_null()),
    };
    query.get_result(conn)
}

#[track_caller]
fn vocabulary_error(e: diesel::result::Error) -> VocabularyError {
    VocabularyError::new(VocabularyErrorKind::Database(e.to_string()))
}

#[async_trait]
impl VocabularySource for SqliteDataProvider {
    #[instrument(
        name = "vocabulary.sqlite.sample",
        skip(self, rng),
        fields(category = %category, story_type = %story_type)
    )]
    async fn sample(
        &self,
        category: StoryDataCategory,
        story_type: StoryType,
        rng: &dyn RandomSource,
    ) -> JokegenResult<String> {
        // The random source is borrowed, so draw the index on this side of
        // the blocking boundary.
        let counts = self
            .run(move |conn| {
                let partition = count_pool(conn, category.name(), Some(story_type.name()))
                    .map_err(vocabulary_error)?;
                let shared =
                    count_pool(conn, category.name(), None).map_err(vocabulary_error)?;
                Ok((partition, shared))
            })
            .await?;

        let (pool, count) = match counts {
            (partition, _) if partition > 0 => (Some(story_type), partition),
            (_, shared) if shared > 0 => (None, shared),
            _ => {
                return Err(VocabularyError::new(VocabularyErrorKind::EmptyPool {
                    category: category.name().to_string(),
                    story_type: story_type.name().to_string(),
                })
                .into());
            }
        };
        let offset = rng.index(count as usize) as i64;
        debug!(partitioned = pool.is_some(), count, offset, "Drawing vocabulary row");

        self.run(move |conn| {
            let value = value_at(conn, category.name(), pool.map(|t| t.name()), offset)
                .map_err(vocabulary_error)?;
            Ok(value)
        })
        .await
    }
}

#[async_trait]
impl ResultStore for SqliteDataProvider {
    #[instrument(
        name = "store.sqlite.put",
        skip(self, result),
        fields(story_type = %story_type)
    )]
    async fn put(&self, story_type: StoryType, result: &StoryResult) -> JokegenResult<()> {
        let row = NewStoryRowBuilder::default()
            .story_type(story_type.name())
            .prompt(result.prompt().as_str())
            .story(result.story().as_str())
            .created_at(result.timestamp().naive_utc())
            .build()
            .map_err(|e| StoreError::new(StoreErrorKind::Database(e.to_string())))?;

        self.run(move |conn| {
            diesel::insert_into(stories::table)
                .values(&row)
                .execute(conn)
                .map_err(StoreError::from)?;
            Ok(())
        })
        .await?;

        debug!("Story row inserted");
        Ok(())
    }

    #[instrument(name = "store.sqlite.get_latest", skip(self), fields(story_type = %story_type))]
    async fn get_latest(&self, story_type: StoryType) -> JokegenResult<Option<StoryResult>> {
        let row = self
            .run(move |conn| {
                let row = stories::table
                    .filter(stories::story_type.eq(story_type.name()))
                    .order(stories::id.desc())
                    .select(StoryRow::as_select())
                    .first(conn)
                    .optional()
                    .map_err(StoreError::from)?;
                Ok(row)
            })
            .await?;
        Ok(row.map(StoryResult::from))
    }
}

#[async_trait]
impl StoryDataProvider for SqliteDataProvider {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    #[instrument(name = "database.close", skip(self))]
    async fn close(&self) -> JokegenResult<()> {
        if !self.closed.swap(true, Ordering::SeqCst) {
            info!("SQLite backend closed");
        }
        Ok(())
    }
}
