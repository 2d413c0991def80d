use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::container::Container;
use super::controller::{chat, health};

pub const CHAT_ROUTE: &str = "/api/chat";

/// Assemble the HTTP application: the chat route, a health probe, permissive
/// CORS for browser clients and per-request tracing.
pub fn build_router(container: Arc<Container>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any);

    Router::new()
        .route(CHAT_ROUTE, post(chat))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(container)
}
