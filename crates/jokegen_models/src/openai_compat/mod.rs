//! Client for APIs that follow the OpenAI chat completions format.

mod client;
mod conversions;
mod dto;

pub use client::OpenAICompatibleClient;
pub use conversions::{from_chat_response, to_chat_request};
pub use dto::{ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChatUsage};
