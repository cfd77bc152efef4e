//! Error types for the jokegen story generator.
//!
//! Every concern has its own location-tracked error struct. They all lift
//! into [`JokegenError`] through `?`, which is what the pipeline and the
//! front ends pass around.

mod config;
mod generation;
mod store;
mod story_type;
mod vocabulary;

pub use config::ConfigError;
pub use generation::{GenerationError, GenerationErrorKind};
pub use store::{StoreError, StoreErrorKind};
pub use story_type::StoryTypeError;
pub use vocabulary::{VocabularyError, VocabularyErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum JokegenErrorKind {
    /// Story type name did not match a known story type
    #[display("{}", _0)]
    UnknownStoryType(StoryTypeError),
    /// A required vocabulary draw could not be satisfied
    #[display("{}", _0)]
    VocabularyUnavailable(VocabularyError),
    /// The text generation service call failed
    #[display("{}", _0)]
    Generation(GenerationError),
    /// Reading or writing the result store failed
    #[display("{}", _0)]
    Store(StoreError),
    /// Configuration error
    #[display("{}", _0)]
    Config(ConfigError),
}

/// Jokegen error with kind discrimination.
#[derive(Debug)]
pub struct JokegenError(Box<JokegenErrorKind>);

impl JokegenError {
    /// Create a new error from a kind.
    pub fn new(kind: JokegenErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &JokegenErrorKind {
        &self.0
    }

    /// Returns true when the caller supplied bad input rather than the
    /// system failing.
    ///
    /// # Examples
    ///
    /// ```
    /// use jokegen_error::{JokegenError, StoreError, StoreErrorKind, StoryTypeError};
    ///
    /// assert!(JokegenError::from(StoryTypeError::new("grumble")).is_client_error());
    /// assert!(!JokegenError::from(StoreError::new(StoreErrorKind::Closed)).is_client_error());
    /// ```
    pub fn is_client_error(&self) -> bool {
        matches!(self.kind(), JokegenErrorKind::UnknownStoryType(_))
    }
}

impl std::fmt::Display for JokegenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Jokegen Error: {}", self.0)
    }
}

impl std::error::Error for JokegenError {}

// Generic From implementation for any type that converts to JokegenErrorKind
impl<T> From<T> for JokegenError
where
    T: Into<JokegenErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for jokegen operations.
pub type JokegenResult<T> = std::result::Result<T, JokegenError>;
