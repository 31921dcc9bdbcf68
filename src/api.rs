//! HTTP endpoints for co-located producers.
//!
//! A command front end running in the same deployment doesn't need a client
//! socket just to push one command; it POSTs the payload here instead.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::hub::Hub;

/// Response for POST /publish
#[derive(Debug, Clone, Serialize)]
pub struct PublishResponse {
    /// Number of clients the payload was delivered to.
    pub delivered: usize,
}

/// Response for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub clients: usize,
}

/// Publish an opaque command to every connected client.
///
/// POST /publish with the payload as the raw request body.
pub async fn publish(State(hub): State<Hub>, body: String) -> Json<PublishResponse> {
    tracing::info!(len = body.len(), "producer publish");
    let delivered = hub.publish(&body).await;
    Json(PublishResponse { delivered })
}

/// Current connection count.
///
/// GET /stats
pub async fn stats(State(hub): State<Hub>) -> Json<StatsResponse> {
    Json(StatsResponse {
        clients: hub.registry().count().await,
    })
}
