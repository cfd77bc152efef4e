//! Text generation service error types.

/// Failure conditions when calling the text generation service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// API key not found in configuration or environment
    #[display("API key not set (looked in {})", _0)]
    MissingApiKey(String),
    /// Transport-level failure
    #[display("HTTP error: {}", _0)]
    Http(String),
    /// The service answered with a non-success status
    #[display("API error (status {}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message returned by the service
        message: String,
    },
    /// The response body could not be decoded
    #[display("Response parsing failed: {}", _0)]
    ResponseParsing(String),
    /// The service returned no usable text
    #[display("Service returned an empty completion")]
    EmptyResponse,
    /// Building the request failed
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),
}

/// Text generation error with location tracking.
///
/// # Examples
///
/// ```
/// use jokegen_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::Api {
///     status: 429,
///     message: "slow down".to_string(),
/// });
/// assert!(format!("{}", err).contains("429"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
