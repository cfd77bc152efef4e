//! Text generation driver trait.

use async_trait::async_trait;
use jokegen_core::{GenerateRequest, GenerateResponse};
use jokegen_error::{GenerationError, GenerationErrorKind, JokegenResult};
use tracing::debug;

/// Client for an external text generation service.
#[async_trait]
pub trait JokegenDriver: Send + Sync {
    /// Send a request and await the full response.
    async fn generate(&self, req: &GenerateRequest) -> JokegenResult<GenerateResponse>;

    /// Provider name for logs.
    fn provider_name(&self) -> &'static str;

    /// Model the driver sends requests to.
    fn model_name(&self) -> &str;

    /// Single-turn completion of `prompt`.
    ///
    /// # Errors
    ///
    /// Propagates driver errors, and returns
    /// [`GenerationErrorKind::EmptyResponse`] when the service produced no
    /// text, so an empty story is never handed to the caller.
    async fn complete(&self, prompt: &str) -> JokegenResult<String> {
        let response = self.generate(&GenerateRequest::single_turn(prompt)).await?;
        let text = response.text();
        if text.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse).into());
        }
        debug!(
            provider = self.provider_name(),
            chars = text.len(),
            "Completion received"
        );
        Ok(text)
    }
}
