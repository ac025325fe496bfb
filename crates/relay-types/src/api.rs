use serde::{Deserialize, Serialize};

use crate::models::Message;

// -- Ingestion --

/// Body of a client submission. Both fields are optional on the wire; the
/// ingestion path decides what a missing value means.
#[derive(Debug, Default, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub ok: bool,
    pub message: Message,
}

// -- Replication --

#[derive(Debug, Serialize, Deserialize)]
pub struct ReplicateResponse {
    pub ok: bool,
    /// `false` when the id was already present (idempotent replay).
    pub added: bool,
}

// -- Health --

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub node: String,
    pub messages: usize,
    pub peer: bool,
    pub persist_failures: u64,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
