//! Result store error types.

/// Kinds of result store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// I/O error while reading or writing the cache file
    #[display("I/O error: {}", _0)]
    Io(String),
    /// Stored data could not be encoded or decoded
    #[display("Serialization error: {}", _0)]
    Serialization(String),
    /// Could not obtain a database connection
    #[display("Database connection error: {}", _0)]
    Connection(String),
    /// Query execution failed
    #[display("Database query error: {}", _0)]
    Database(String),
    /// Migration error
    #[display("Migration error: {}", _0)]
    Migration(String),
    /// The store was used after it was closed
    #[display("Store is closed")]
    Closed,
}

/// Result store error with location tracking.
///
/// # Examples
///
/// ```
/// use jokegen_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::Io("disk full".to_string()));
/// assert!(format!("{}", err).contains("disk full"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

// Diesel error conversions (only available with database feature)
#[cfg(feature = "database")]
impl From<diesel::result::Error> for StoreError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        StoreError::new(StoreErrorKind::Database(err.to_string()))
    }
}

#[cfg(feature = "database")]
impl From<diesel::ConnectionError> for StoreError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        StoreError::new(StoreErrorKind::Connection(err.to_string()))
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        StoreError::new(StoreErrorKind::Serialization(err.to_string()))
    }
}
