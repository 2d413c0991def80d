mod chat_transport;
mod text_generator;

pub use chat_transport::*;
pub use text_generator::*;
