//! # Application Layer
//!
//! Use cases for both sides of the chat: the endpoint's reply generation and
//! the client's session state machine, plus the ports they depend on.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
