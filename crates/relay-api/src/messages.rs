use axum::{Json, body::Bytes, extract::State, response::IntoResponse};
use chrono::Utc;
use tracing::warn;

use relay_types::api::{SendMessageRequest, SendMessageResponse};
use relay_types::{Message, Provenance};

use crate::error::{ApiError, parse_body};
use crate::ingest;
use crate::state::AppState;

/// Client submission: `{ "user": "Alice", "text": "Hello" }`.
///
/// Mints the id and timestamp here, stores the message, and triggers one
/// forward to the peer. Peer trouble never reaches the client.
pub async fn send_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req: SendMessageRequest = parse_body(&body)?;

    let msg = Message::compose(
        req.user.as_deref(),
        req.text.as_deref().unwrap_or_default(),
        &state.node_name,
        Utc::now(),
    )?;

    if !ingest::accept(&state, msg.clone(), Provenance::Local).await? {
        // Same user inside the same millisecond; the earlier message keeps the id.
        warn!("Locally minted id {} collided with an existing message", msg.id);
    }

    Ok(Json(SendMessageResponse { ok: true, message: msg }))
}

/// Every message this node holds, in the order it accepted them.
pub async fn get_messages(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(ingest::snapshot(&state).await?))
}
