//! Conversation messages sent to the text generation service.

use serde::{Deserialize, Serialize};

/// Conversation participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single text message in a conversation.
///
/// # Examples
///
/// ```
/// use jokegen_core::{Message, Role};
///
/// let message = Message::new(Role::User, "Tell me a story".to_string());
///
/// assert_eq!(*message.role(), Role::User);
/// assert_eq!(message.content(), "Tell me a story");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct Message {
    /// The role of the message sender
    role: Role,
    /// The text of the message
    content: String,
}

impl Message {
    /// Creates a new message with the given role and content.
    pub fn new(role: Role, content: String) -> Self {
        Self { role, content }
    }

    /// Shorthand for a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content.into())
    }

    /// Returns a builder for constructing a Message.
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }
}
