mod chat_session;
mod error_classifier;
mod generate_reply;

pub use chat_session::*;
pub use error_classifier::*;
pub use generate_reply::*;
