use tracing::{debug, warn};

use crate::application::ChatTransport;
use crate::domain::{DomainError, Message, ReplyOutcome};

pub const GREETING: &str = "Hey! How can I help you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Input enabled, nothing in flight.
    Idle,
    /// One request in flight; input disabled until it resolves.
    AwaitingReply,
}

/// Client-side conversation state for one run of the client.
///
/// The transcript only ever grows. At most one request is outstanding: while
/// [`SessionPhase::AwaitingReply`] holds, [`ChatSession::submit`] refuses.
#[derive(Debug)]
pub struct ChatSession {
    transcript: Vec<Message>,
    input: String,
    phase: SessionPhase,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            transcript: vec![Message::bot(GREETING)],
            input: String::new(),
            phase: SessionPhase::Idle,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_input_enabled(&self) -> bool {
        self.phase == SessionPhase::Idle
    }

    /// Whether the typing indicator should be shown.
    pub fn is_awaiting_reply(&self) -> bool {
        self.phase == SessionPhase::AwaitingReply
    }

    pub fn can_submit(&self) -> bool {
        self.is_input_enabled() && !self.input.trim().is_empty()
    }

    /// Replace the input buffer. Ignored while input is disabled.
    pub fn set_input(&mut self, text: impl Into<String>) {
        if self.is_input_enabled() {
            self.input = text.into();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.is_input_enabled() {
            self.input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if self.is_input_enabled() {
            self.input.pop();
        }
    }

    /// Start sending the current input.
    ///
    /// Appends the user message, clears the input and disables further
    /// submits. Returns the text to send, or `None` when the input is blank
    /// or a request is already in flight.
    pub fn submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }

        let text = std::mem::take(&mut self.input);
        self.transcript.push(Message::user(text.clone()));
        self.phase = SessionPhase::AwaitingReply;
        debug!("Submitted message ({} chars)", text.len());
        Some(text)
    }

    /// Finish the in-flight request with exactly one bot message.
    ///
    /// Returns `None` (and changes nothing) when no request is in flight.
    pub fn resolve(&mut self, outcome: &ReplyOutcome) -> Option<&Message> {
        if self.phase != SessionPhase::AwaitingReply {
            warn!("Ignoring reply outcome with no request in flight");
            return None;
        }

        self.transcript.push(Message::bot(outcome.display_text()));
        self.phase = SessionPhase::Idle;
        self.transcript.last()
    }

    /// Submit the current input through `transport` and resolve with whatever
    /// comes back.
    pub async fn send<T: ChatTransport + ?Sized>(&mut self, transport: &T) -> Option<&Message> {
        let text = self.submit()?;
        let outcome = settle_outcome(transport.send_message(&text).await);
        self.resolve(&outcome)
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse a transport result into an outcome; transport errors become a
/// network failure.
pub fn settle_outcome(result: Result<ReplyOutcome, DomainError>) -> ReplyOutcome {
    result.unwrap_or_else(|e| {
        warn!(error = %e, "Chat request failed before a response arrived");
        ReplyOutcome::NetworkFailure
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorKind, Sender, NETWORK_ERROR_TEXT, RATE_LIMIT_TEXT};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubTransport {
        result: fn() -> Result<ReplyOutcome, DomainError>,
        sent: Mutex<Vec<String>>,
    }

    impl StubTransport {
        fn new(result: fn() -> Result<ReplyOutcome, DomainError>) -> Self {
            Self {
                result,
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatTransport for StubTransport {
        async fn send_message(&self, message: &str) -> Result<ReplyOutcome, DomainError> {
            self.sent.lock().unwrap().push(message.to_string());
            (self.result)()
        }
    }

    #[test]
    fn test_new_session_is_seeded() {
        let session = ChatSession::new();

        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].text(), GREETING);
        assert_eq!(session.transcript()[0].sender(), Sender::Bot);
        assert!(session.is_input_enabled());
        assert!(!session.is_awaiting_reply());
    }

    #[test]
    fn test_submit_appends_user_message_and_disables_input() {
        let mut session = ChatSession::new();
        session.set_input("Hello");

        let sent = session.submit();

        assert_eq!(sent.as_deref(), Some("Hello"));
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].text(), "Hello");
        assert_eq!(session.transcript()[1].sender(), Sender::User);
        assert_eq!(session.input(), "");
        assert!(!session.is_input_enabled());
        assert!(session.is_awaiting_reply());
    }

    #[test]
    fn test_blank_input_is_not_submitted() {
        let mut session = ChatSession::new();
        session.set_input("   ");

        assert!(!session.can_submit());
        assert_eq!(session.submit(), None);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_no_second_submit_while_awaiting() {
        let mut session = ChatSession::new();
        session.set_input("first");
        session.submit();

        session.set_input("second");
        session.push_char('!');

        assert_eq!(session.input(), "");
        assert_eq!(session.submit(), None);
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn test_resolve_without_request_is_ignored() {
        let mut session = ChatSession::new();

        assert!(session.resolve(&ReplyOutcome::Reply("stray".into())).is_none());
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn test_resolve_maps_error_kind() {
        let mut session = ChatSession::new();
        session.set_input("Hello");
        session.submit();

        let message = session
            .resolve(&ReplyOutcome::Failed {
                kind: Some(ErrorKind::RateLimit),
                error: Some("Too many requests. Please wait a moment and try again.".into()),
            })
            .unwrap();

        assert_eq!(message.text(), RATE_LIMIT_TEXT);
        assert!(session.is_input_enabled());
    }

    #[tokio::test]
    async fn test_send_round_trip_grows_transcript_by_two() {
        let transport = StubTransport::new(|| Ok(ReplyOutcome::Reply("Hi there".into())));
        let mut session = ChatSession::new();
        session.set_input("Hello");

        let reply = session.send(&transport).await.unwrap();

        assert_eq!(reply.text(), "Hi there");
        assert_eq!(reply.sender(), Sender::Bot);
        assert_eq!(session.transcript().len(), 3);
        assert!(session.is_input_enabled());
        assert_eq!(*transport.sent.lock().unwrap(), vec!["Hello".to_string()]);
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_network_error() {
        let transport = StubTransport::new(|| Err(DomainError::transport("connection refused")));
        let mut session = ChatSession::new();
        session.set_input("Hello");

        let reply = session.send(&transport).await.unwrap();

        assert_eq!(reply.text(), NETWORK_ERROR_TEXT);
        assert!(session.is_input_enabled());
    }

    #[tokio::test]
    async fn test_identical_messages_stay_distinct() {
        let transport = StubTransport::new(|| Ok(ReplyOutcome::Reply("ok".into())));
        let mut session = ChatSession::new();

        session.set_input("again");
        session.send(&transport).await;
        session.set_input("again");
        session.send(&transport).await;

        let user_messages: Vec<&Message> = session
            .transcript()
            .iter()
            .filter(|m| m.sender().is_user())
            .collect();
        assert_eq!(user_messages.len(), 2);
        assert_ne!(user_messages[0].id(), user_messages[1].id());
        assert_eq!(session.transcript()[1].text(), "again");
        assert_eq!(session.transcript()[3].text(), "again");
    }
}
