use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn is_user(&self) -> bool {
        matches!(self, Sender::User)
    }
}

/// One entry of the client transcript. Immutable once created.
#[derive(Debug, Clone)]
pub struct Message {
    id: String,
    text: String,
    sender: Sender,
    timestamp: DateTime<Local>,
}

impl Message {
    /// Ids are UUIDv7, so they are unique and sort in creation order.
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            text: text.into(),
            sender,
            timestamp: Local::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// `HH:MM` label shown under each bubble.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ids_are_distinct_for_identical_text() {
        let a = Message::user("same");
        let b = Message::user("same");

        assert_ne!(a.id(), b.id());
        assert_eq!(a.text(), b.text());
    }

    #[test]
    fn test_constructors_set_sender() {
        assert_eq!(Message::user("hi").sender(), Sender::User);
        assert_eq!(Message::bot("hi").sender(), Sender::Bot);
        assert!(Sender::User.is_user());
        assert!(!Sender::Bot.is_user());
    }

    #[test]
    fn test_time_label_format() {
        let label = Message::bot("hello").time_label();

        assert_eq!(label.len(), 5);
        assert_eq!(&label[2..3], ":");
    }
}
