//! SQLite backend for jokegen.
//!
//! Stories and vocabulary live in two tables created by the embedded
//! migrations. Vocabulary rows with a NULL story type form the shared pool;
//! rows tagged with a story type are preferred for that type.

mod connection;
mod importer;
mod models;
mod provider;
pub mod schema;

pub use connection::{
    BUSY_TIMEOUT_MS, MIGRATIONS, SqlitePool, create_pool, is_in_memory, run_migrations,
};
pub use importer::{ImportOptions, ImportOptionsBuilder, ImportReport, VocabularyImporter};
pub use models::{NewStoryRow, NewStoryRowBuilder, NewVocabularyRow, StoryRow, VocabularyRow};
pub use provider::SqliteDataProvider;
