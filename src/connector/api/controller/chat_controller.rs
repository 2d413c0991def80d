use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use crate::connector::api::{ChatFailure, Container};
use crate::domain::ChatReply;

/// `POST /api/chat`
///
/// The body is read as raw bytes so that malformed JSON gets the same
/// `Invalid message format` answer as a well-formed but unusable body.
pub async fn chat(
    State(container): State<Arc<Container>>,
    body: Bytes,
) -> Result<Json<ChatReply>, ChatFailure> {
    let use_case = container.generate_reply_use_case();
    let reply = use_case.execute_body(&body).await?;
    Ok(Json(reply))
}
