//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Text generation (Gemini over HTTP, offline mock)
//! - The HTTP endpoint (axum router, controllers, error mapping)
//! - The client side (HTTP transport, terminal UI)

pub mod adapter;
pub mod api;
pub mod tui;

pub use adapter::*;
