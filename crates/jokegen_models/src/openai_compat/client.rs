//! Client for OpenAI-compatible chat completion APIs.

use crate::config::ModelConfig;
use crate::openai_compat::{ChatResponse, conversions};
use async_trait::async_trait;
use jokegen_core::{GenerateRequest, GenerateResponse};
use jokegen_error::{GenerationError, GenerationErrorKind, JokegenResult};
use jokegen_interface::JokegenDriver;
use reqwest::Client;
use tracing::{debug, error, instrument};

/// Client for any API that speaks the OpenAI chat completions format.
///
/// No retries and no client-side timeout beyond reqwest's defaults; a
/// failed call surfaces as an error to the caller.
#[derive(Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    provider_name: &'static str,
}

impl std::fmt::Debug for OpenAICompatibleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAICompatibleClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("provider_name", &self.provider_name)
            .finish_non_exhaustive()
    }
}

impl OpenAICompatibleClient {
    /// Client posting to `base_url` with `api_key` as the bearer token.
    ///
    /// `provider_name` only labels log records.
    #[instrument(name = "chat_client.new", skip(api_key), fields(provider = provider_name, model = %model))]
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        provider_name: &'static str,
    ) -> Self {
        debug!(url = %base_url, "Chat client ready");

        Self {
            client: Client::new(),
            api_key,
            model,
            base_url,
            provider_name,
        }
    }

    /// Build a client from configuration.
    ///
    /// `api_key` takes precedence over the environment variable named in
    /// the configuration.
    ///
    /// # Errors
    ///
    /// Returns a missing API key error when neither source has a key.
    pub fn from_config(
        config: &ModelConfig,
        api_key: Option<String>,
    ) -> Result<Self, GenerationError> {
        let api_key = config.resolve_api_key(api_key)?;
        Ok(Self::new(
            api_key,
            config.model().clone(),
            config.base_url().clone(),
            "openai",
        ))
    }

    /// Sends a chat completion request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the response cannot be parsed.
    #[instrument(name = "chat_client.chat", skip_all, fields(provider = self.provider_name, model = %self.model))]
    pub async fn chat(&self, req: &GenerateRequest) -> Result<GenerateResponse, GenerationError> {
        let chat_request = conversions::to_chat_request(req, &self.model)?;

        debug!(messages = chat_request.messages().len(), url = %self.base_url, "Posting chat completion");

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = self.provider_name, error = ?e, "Chat completion request failed");
                GenerationError::new(GenerationErrorKind::Http(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, body = %message, "Service rejected chat completion");
            return Err(GenerationError::new(GenerationErrorKind::Api {
                status: status.as_u16(),
                message,
            }));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Undecodable chat completion body");
            GenerationError::new(GenerationErrorKind::ResponseParsing(e.to_string()))
        })?;

        let usage = chat_response.usage.clone().unwrap_or_default();
        debug!(
            choices = chat_response.choices.len(),
            prompt_tokens = ?usage.prompt_tokens,
            completion_tokens = ?usage.completion_tokens,
            "Chat completion received"
        );

        conversions::from_chat_response(&chat_response)
    }

    /// Returns the endpoint URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl JokegenDriver for OpenAICompatibleClient {
    async fn generate(&self, req: &GenerateRequest) -> JokegenResult<GenerateResponse> {
        Ok(self.chat(req).await?)
    }

    fn provider_name(&self) -> &'static str {
        self.provider_name
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
