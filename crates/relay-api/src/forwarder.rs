use std::time::Duration;

use anyhow::Context;
use relay_types::Message;
use tracing::{debug, warn};

/// Default hard timeout for one forward attempt.
pub const DEFAULT_FORWARD_TIMEOUT: Duration = Duration::from_secs(2);

/// Best-effort, single-hop push of locally accepted messages to one peer.
///
/// Sends go to the peer's `/replicate` route so the peer stores the message
/// as-is and never forwards it again. Failures are logged and dropped; there
/// is no retry.
#[derive(Clone)]
pub struct ReplicationForwarder {
    peer_url: Option<String>,
    client: reqwest::Client,
}

impl ReplicationForwarder {
    pub fn new(peer_url: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building peer HTTP client")?;

        let peer_url = peer_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Ok(Self { peer_url, client })
    }

    /// A forwarder with no peer. `forward` is a no-op.
    pub fn disabled() -> Self {
        Self {
            peer_url: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn peer_url(&self) -> Option<&str> {
        self.peer_url.as_deref()
    }

    /// Dispatch `msg` to the peer on a detached task and return immediately.
    ///
    /// Returns the task handle so callers that care (tests) can wait for the
    /// attempt; request handlers drop it.
    pub fn forward(&self, msg: Message) -> Option<tokio::task::JoinHandle<()>> {
        let peer_url = self.peer_url.clone()?;
        let client = self.client.clone();

        Some(tokio::spawn(async move {
            match send(&client, &peer_url, &msg).await {
                Ok(()) => debug!("Forwarded message {} to {}", msg.id, peer_url),
                Err(e) => warn!("Failed to forward to peer {}: {:#}", peer_url, e),
            }
        }))
    }
}

async fn send(client: &reqwest::Client, peer_url: &str, msg: &Message) -> anyhow::Result<()> {
    client
        .post(format!("{peer_url}/replicate"))
        .json(msg)
        .send()
        .await
        .context("request to peer failed")?
        .error_for_status()
        .context("peer rejected replication")?;
    Ok(())
}
