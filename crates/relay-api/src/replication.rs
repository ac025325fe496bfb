use axum::{Json, body::Bytes, extract::State, response::IntoResponse};
use serde_json::Value;

use relay_types::api::ReplicateResponse;
use relay_types::{Message, Provenance, ValidationError};

use crate::error::{ApiError, parse_body};
use crate::ingest;
use crate::state::AppState;

/// Peer submission of an already formed message.
///
/// The message is stored verbatim and not forwarded further. `added` is
/// `false` when the id was already known.
pub async fn replicate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let value: Value = parse_body(&body)?;
    if is_empty_payload(&value) {
        return Err(ValidationError::NoData.into());
    }

    let msg: Message =
        serde_json::from_value(value).map_err(|e| ValidationError::Malformed(e.to_string()))?;
    msg.validate_replica()?;

    let added = ingest::accept(&state, msg, Provenance::Replicated).await?;

    Ok(Json(ReplicateResponse { ok: true, added }))
}

fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
