use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Sender name used when a client does not supply one.
pub const DEFAULT_USER: &str = "anon";

/// A relayed chat message.
///
/// Messages are immutable once accepted by a store. The `id` is the only
/// deduplication key; it is minted by the node that first accepts the message
/// from a client and carried verbatim through replication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(default = "default_user", deserialize_with = "user_or_default")]
    pub user: String,
    pub text: String,
    /// Creation time, assigned once at local ingestion.
    #[serde(rename = "ts")]
    pub timestamp: DateTime<Utc>,
    /// Label of the node that accepted the message from a client.
    pub origin: String,
}

/// How a message reached this node.
///
/// Only `Local` messages are forwarded, which bounds replication to one hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Local,
    Replicated,
}

impl Provenance {
    pub fn should_forward(self) -> bool {
        matches!(self, Self::Local)
    }
}

impl Message {
    /// Build a fresh message from raw client input.
    ///
    /// Text that is empty or whitespace-only is rejected before an id is
    /// minted. A missing or blank user falls back to [`DEFAULT_USER`].
    pub fn compose(
        user: Option<&str>,
        text: &str,
        origin: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }

        let user = normalize_user(user);

        Ok(Self {
            id: mint_id(now, &user),
            user,
            text: text.to_string(),
            timestamp: now,
            origin: origin.to_string(),
        })
    }

    /// Check a message received from a peer before it reaches the store.
    pub fn validate_replica(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingId);
        }
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(())
    }
}

/// Millisecond timestamp followed by the sender name.
///
/// Uniqueness is best-effort: two submissions from the same user inside the
/// same millisecond produce the same id, and the second one is deduplicated.
pub fn mint_id(now: DateTime<Utc>, user: &str) -> String {
    format!("{}-{}", now.timestamp_millis(), user)
}

fn normalize_user(user: Option<&str>) -> String {
    match user.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_USER.to_string(),
    }
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

// Stored messages are kept verbatim; only an absent or null user is filled in.
fn user_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let user: Option<String> = Option::deserialize(deserializer)?;
    Ok(user.unwrap_or_else(default_user))
}
