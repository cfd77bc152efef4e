//! Story type parsing errors.

/// A story type name that does not match any known story type.
///
/// # Examples
///
/// ```
/// use jokegen_error::StoryTypeError;
///
/// let err = StoryTypeError::new("grumble");
/// assert_eq!(err.input, "grumble");
/// assert!(format!("{}", err).contains("Unknown story type"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Unknown story type: '{}' at line {} in {}", input, line, file)]
pub struct StoryTypeError {
    /// The rejected input
    pub input: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl StoryTypeError {
    /// Create a new StoryTypeError for the rejected input at the current location.
    #[track_caller]
    pub fn new(input: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            input: input.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
