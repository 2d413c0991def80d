mod chat_reply;
mod conversation;
mod message;
mod reply_outcome;

pub use chat_reply::*;
pub use conversation::*;
pub use message::*;
pub use reply_outcome::*;
