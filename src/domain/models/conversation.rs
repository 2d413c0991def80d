use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

/// Error text returned for any request body the endpoint cannot use.
pub const INVALID_MESSAGE_FORMAT: &str = "Invalid message format";

/// Role of a turn as sent by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    /// Role name in the provider's vocabulary.
    pub fn provider_role(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

impl ConversationTurn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// What gets sent upstream for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatPrompt {
    Single(String),
    Conversation(Vec<ConversationTurn>),
}

impl ChatPrompt {
    /// Parse a raw request body.
    ///
    /// A non-empty `conversation` array wins over `message`; a non-empty
    /// `message` string is used otherwise. Anything else is invalid input.
    pub fn from_body(body: &[u8]) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|_| DomainError::invalid_input(INVALID_MESSAGE_FORMAT))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        let Value::Object(mut fields) = value else {
            return Err(DomainError::invalid_input(INVALID_MESSAGE_FORMAT));
        };

        if let Some(Value::Array(turns)) = fields.remove("conversation") {
            if !turns.is_empty() {
                let turns: Vec<ConversationTurn> =
                    serde_json::from_value(Value::Array(turns))
                        .map_err(|_| DomainError::invalid_input(INVALID_MESSAGE_FORMAT))?;
                return Ok(ChatPrompt::Conversation(turns));
            }
        }

        match fields.remove("message") {
            Some(Value::String(message)) if !message.is_empty() => Ok(ChatPrompt::Single(message)),
            _ => Err(DomainError::invalid_input(INVALID_MESSAGE_FORMAT)),
        }
    }

    pub fn turn_count(&self) -> usize {
        match self {
            ChatPrompt::Single(_) => 1,
            ChatPrompt::Conversation(turns) => turns.len(),
        }
    }
}
