//! # Domain Layer
//!
//! Chat messages, wire-level request/response shapes and the error type.
//! This layer is independent of HTTP frameworks and provider SDKs.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
