//! Vocabulary error types.

/// Reasons a vocabulary draw could not be satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum VocabularyErrorKind {
    /// Neither the partition pool nor the shared pool has entries
    #[display("No {} entries available for story type '{}'", category, story_type)]
    EmptyPool {
        /// Category name (theme, style, modifier)
        category: String,
        /// Story type name
        story_type: String,
    },
    /// Reading a vocabulary file failed
    #[display("Failed to read vocabulary: {}", _0)]
    Io(String),
    /// Querying the vocabulary table failed
    #[display("Vocabulary query failed: {}", _0)]
    Database(String),
    /// A named resource is not part of the bundle
    #[display("Missing vocabulary resource: {}", _0)]
    MissingResource(String),
}

/// Vocabulary error with location tracking.
///
/// # Examples
///
/// ```
/// use jokegen_error::{VocabularyError, VocabularyErrorKind};
///
/// let err = VocabularyError::new(VocabularyErrorKind::EmptyPool {
///     category: "style".to_string(),
///     story_type: "curse".to_string(),
/// });
/// assert!(format!("{}", err).contains("No style entries"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Vocabulary Error: {} at line {} in {}", kind, line, file)]
pub struct VocabularyError {
    /// The kind of error that occurred
    pub kind: VocabularyErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl VocabularyError {
    /// Create a new vocabulary error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: VocabularyErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
