//! Database connection utilities.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use jokegen_error::{StoreError, StoreErrorKind};
use tracing::instrument;

/// Migrations compiled into the crate.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Pooled SQLite connections.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// How long a connection waits on a locked database before failing.
pub const BUSY_TIMEOUT_MS: u32 = 5_000;

const MAX_POOL_SIZE: u32 = 8;

/// Applies per-connection pragmas when the pool hands out a connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionPragmas {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        diesel::sql_query(format!("PRAGMA busy_timeout = {};", self.busy_timeout_ms))
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;
        Ok(())
    }
}

/// Create a connection pool for the SQLite database at `database_url`.
///
/// `:memory:` gets a single connection that is never recycled, since every
/// SQLite in-memory connection is its own database.
///
/// # Errors
///
/// Returns a connection error if the pool cannot open the database.
#[instrument(name = "database.create_pool")]
pub fn create_pool(database_url: &str) -> Result<SqlitePool, StoreError> {
    let in_memory = is_in_memory(database_url);
    let builder = if in_memory {
        Pool::builder()
            .max_size(1)
            .min_idle(Some(1))
            .max_lifetime(None)
            .idle_timeout(None)
    } else {
        Pool::builder().max_size(MAX_POOL_SIZE)
    };

    tracing::debug!(in_memory, "Creating SQLite connection pool");
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);

    builder
        .connection_customizer(Box::new(ConnectionPragmas {
            busy_timeout_ms: BUSY_TIMEOUT_MS,
        }))
        .build(manager)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to create connection pool");
            StoreError::new(StoreErrorKind::Connection(e.to_string()))
        })
}

/// True for URLs naming a private in-memory database.
pub fn is_in_memory(database_url: &str) -> bool {
    database_url == ":memory:"
}

/// Apply any migrations the database has not seen yet.
///
/// # Errors
///
/// Returns a migration error if a migration fails to apply.
#[instrument(name = "database.run_migrations", skip(conn))]
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), StoreError> {
    let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
        tracing::error!(error = %e, "Failed to run migrations");
        StoreError::new(StoreErrorKind::Migration(e.to_string()))
    })?;
    tracing::debug!(count = applied.len(), "Migrations applied");
    Ok(())
}
