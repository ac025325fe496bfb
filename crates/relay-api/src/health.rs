use axum::{Json, extract::State};

use relay_types::api::HealthResponse;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    // An append holds the store lock across its disk write.
    let store = state.clone();
    let (messages, persist_failures) = tokio::task::spawn_blocking(move || {
        (store.store.len(), store.store.persist_failures())
    })
    .await
    .map_err(|e| ApiError::Internal(format!("spawn_blocking join error: {e}")))?;

    Ok(Json(HealthResponse {
        status: "ok".into(),
        node: state.node_name.clone(),
        messages,
        peer: state.forwarder.peer_url().is_some(),
        persist_failures,
    }))
}
