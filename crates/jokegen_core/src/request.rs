//! Request and response types for text generation.

use crate::Message;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Generic generation request.
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Default, Getters, derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// Conversation turns, oldest first
    messages: Vec<Message>,
    /// Upper bound on generated tokens
    max_tokens: Option<u32>,
    /// Sampling temperature
    temperature: Option<f32>,
    /// Model override; drivers use their configured model when unset
    model: Option<String>,
}

impl GenerateRequest {
    /// A request carrying one user turn.
    ///
    /// # Examples
    ///
    /// ```
    /// use jokegen_core::GenerateRequest;
    ///
    /// let request = GenerateRequest::single_turn("Describe a pirate");
    /// assert_eq!(request.messages().len(), 1);
    /// ```
    pub fn single_turn(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(prompt)],
            ..Self::default()
        }
    }

    /// Returns a builder for constructing a GenerateRequest.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// Output produced by the text generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),
}

/// The unified response object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct GenerateResponse {
    /// Outputs in the order the service produced them
    outputs: Vec<Output>,
}

impl GenerateResponse {
    /// All text outputs joined with newlines.
    pub fn text(&self) -> String {
        self.outputs
            .iter()
            .map(|output| match output {
                Output::Text(text) => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
