use relay_types::{Message, Provenance};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Append `msg` to the node's log and, for client submissions, hand it to
/// the forwarder.
///
/// Replicated messages are never forwarded again. The forward runs on a
/// detached task; this returns as soon as the message is stored.
pub async fn accept(
    state: &AppState,
    msg: Message,
    provenance: Provenance,
) -> Result<bool, ApiError> {
    let store = state.clone();
    let candidate = msg.clone();
    let added = tokio::task::spawn_blocking(move || store.store.append(candidate))
        .await
        .map_err(|e| ApiError::Internal(format!("spawn_blocking join error: {e}")))?;

    if !added {
        debug!("Message {} already present ({:?})", msg.id, provenance);
        return Ok(false);
    }

    if provenance.should_forward() {
        let _ = state.forwarder.forward(msg);
    }

    Ok(true)
}

/// Full log snapshot, read off the async runtime since an append may be
/// holding the lock across a disk write.
pub async fn snapshot(state: &AppState) -> Result<Vec<Message>, ApiError> {
    let store = state.clone();
    tokio::task::spawn_blocking(move || store.store.snapshot())
        .await
        .map_err(|e| ApiError::Internal(format!("spawn_blocking join error: {e}")))
}
