use std::sync::Arc;

use relay_store::MessageStore;

use crate::forwarder::ReplicationForwarder;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: MessageStore,
    pub forwarder: ReplicationForwarder,
    /// Stamped as `origin` on messages accepted from clients.
    pub node_name: String,
}

impl AppStateInner {
    pub fn new(store: MessageStore, forwarder: ReplicationForwarder, node_name: String) -> AppState {
        Arc::new(Self {
            store,
            forwarder,
            node_name,
        })
    }
}
