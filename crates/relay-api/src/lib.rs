pub mod error;
pub mod forwarder;
pub mod health;
pub mod ingest;
pub mod messages;
pub mod replication;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use state::{AppState, AppStateInner};

/// Routes for one relay node: client ingestion, peer replication, reads.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/send", post(messages::send_message))
        .route("/messages", get(messages::get_messages))
        .route("/replicate", post(replication::replicate))
        .route("/health", get(health::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
