//! Outbound user messages sent to remote agents.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sender role of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// End user.
    User,
    /// Remote agent.
    Agent,
}

/// Content part of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MessagePart {
    /// Plain text.
    Text {
        /// Text content.
        text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum MessageKind {
    #[default]
    Message,
}

/// Message envelope posted to an agent.
///
/// The request identifier is carried alongside the message and used as the
/// JSON-RPC call id; it is not part of the serialized message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    #[serde(skip)]
    request_id: String,
    message_id: String,
    role: MessageRole,
    parts: Vec<MessagePart>,
    kind: MessageKind,
}

impl OutboundMessage {
    /// Creates a user message with one text part and fresh identifiers.
    #[must_use]
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            message_id: Uuid::new_v4().to_string(),
            role: MessageRole::User,
            parts: vec![MessagePart::Text { text: text.into() }],
            kind: MessageKind::Message,
        }
    }

    /// Returns the request identifier.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the message identifier.
    #[must_use]
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Returns the sender role.
    #[must_use]
    pub const fn role(&self) -> MessageRole {
        self.role
    }

    /// Returns the content parts.
    #[must_use]
    pub fn parts(&self) -> &[MessagePart] {
        &self.parts
    }

    /// Returns the concatenated text of every text part.
    #[must_use]
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|MessagePart::Text { text }| text.as_str())
            .collect()
    }
}
