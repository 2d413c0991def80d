mod gemini_client;
mod http_chat_transport;
mod mock_generator;

pub use gemini_client::*;
pub use http_chat_transport::*;
pub use mock_generator::*;
