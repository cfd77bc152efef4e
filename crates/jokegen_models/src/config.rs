//! Text generation service configuration.

use derive_getters::Getters;
use jokegen_error::{GenerationError, GenerationErrorKind};
use serde::{Deserialize, Serialize};

/// Default chat completions endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Default model.
pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";
/// Environment variable holding the API key by default.
pub const DEFAULT_API_KEY_ENV: &str = "OPEN_AI_API_KEY";

/// Where and how to reach the text generation service.
///
/// Every field has a default, so an empty `[model]` table is valid.
///
/// # Examples
///
/// ```
/// use jokegen_models::ModelConfig;
///
/// let config: ModelConfig = toml::from_str("model = \"gpt-4o\"").unwrap();
/// assert_eq!(config.model(), "gpt-4o");
/// assert_eq!(config.api_key_env(), "OPEN_AI_API_KEY");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ModelConfig {
    /// Chat completions endpoint
    base_url: String,
    /// Model identifier
    model: String,
    /// Environment variable consulted for the API key
    api_key_env: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl ModelConfig {
    /// Override the endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Pick the API key: `explicit` first, then the configured environment
    /// variable. Blank values count as missing.
    ///
    /// # Errors
    ///
    /// [`GenerationErrorKind::MissingApiKey`] when no key is found.
    #[track_caller]
    pub fn resolve_api_key(&self, explicit: Option<String>) -> Result<String, GenerationError> {
        explicit
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            })
            .ok_or_else(|| {
                GenerationError::new(GenerationErrorKind::MissingApiKey(
                    self.api_key_env.clone(),
                ))
            })
    }
}
