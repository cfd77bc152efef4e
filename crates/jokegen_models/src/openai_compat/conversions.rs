//! Mapping between jokegen requests and the chat completions wire format.

use crate::openai_compat::{ChatMessage, ChatRequest, ChatResponse};
use jokegen_core::{GenerateRequest, GenerateResponse, Output, Role};
use jokegen_error::{GenerationError, GenerationErrorKind};

fn role_name(role: &Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

/// Build the wire request for `req`.
///
/// A model set on the request overrides `default_model`.
///
/// # Errors
///
/// Returns an invalid request error when `req` carries no messages.
pub fn to_chat_request(
    req: &GenerateRequest,
    default_model: &str,
) -> Result<ChatRequest, GenerationError> {
    if req.messages().is_empty() {
        return Err(GenerationError::new(GenerationErrorKind::InvalidRequest(
            "no messages to send".to_string(),
        )));
    }

    let messages: Vec<ChatMessage> = req
        .messages()
        .iter()
        .map(|msg| ChatMessage {
            role: role_name(msg.role()).to_string(),
            content: msg.content().clone(),
        })
        .collect();

    let mut builder = ChatRequest::builder();
    builder
        .model(req.model().as_deref().unwrap_or(default_model))
        .messages(messages)
        .max_tokens(*req.max_tokens())
        .temperature(*req.temperature());

    builder
        .build()
        .map_err(|e| GenerationError::new(GenerationErrorKind::InvalidRequest(e.to_string())))
}

/// Take the text of the first choice.
///
/// # Errors
///
/// A response without choices is a parsing error; a first choice with
/// blank content is an empty response.
pub fn from_chat_response(response: &ChatResponse) -> Result<GenerateResponse, GenerationError> {
    let choice = response.choices.first().ok_or_else(|| {
        GenerationError::new(GenerationErrorKind::ResponseParsing(
            "response has no choices".to_string(),
        ))
    })?;

    if choice.message.content.trim().is_empty() {
        return Err(GenerationError::new(GenerationErrorKind::EmptyResponse));
    }

    Ok(GenerateResponse::new(vec![Output::Text(
        choice.message.content.clone(),
    )]))
}
