pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    classify, classify_error, settle_outcome, ChatSession, ChatTransport, Classification,
    GenerateReplyUseCase, SessionPhase, TextGenerator,
};

pub use connector::api::{build_router, ChatFailure, Container, ContainerConfig, CHAT_ROUTE};
pub use connector::{GeminiClient, HttpChatTransport, MockTextGenerator, DEFAULT_ENDPOINT};

pub use domain::{
    ChatPrompt, ChatReply, ConversationTurn, DomainError, ErrorBody, ErrorKind, Message,
    ReplyOutcome, Role, Sender,
};
