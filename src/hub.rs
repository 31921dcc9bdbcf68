//! Broadcast hub: fans one text message out to the connected clients.
//!
//! The hub holds no per-message state. Every round takes a registry snapshot,
//! sends to each recipient independently, and prunes any recipient whose
//! channel is gone. A dead client never aborts delivery to the rest.

use crate::registry::{ClientHandle, ConnectionRegistry};

/// Stateless relay over an injected [`ConnectionRegistry`].
#[derive(Clone)]
pub struct Hub {
    registry: ConnectionRegistry,
}

impl Hub {
    pub fn new(registry: ConnectionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Register a newly-accepted connection.
    pub async fn on_connect(&self, handle: ClientHandle) {
        let id = handle.id.clone();
        self.registry.add(handle).await;
        let total = self.registry.count().await;
        tracing::info!(client = %id, total, "client connected");
    }

    /// Unregister a connection. Runs on every exit path of the connection
    /// task, clean close and error alike. Safe to call twice.
    pub async fn on_disconnect(&self, id: &str) {
        if self.registry.remove(id).await {
            let remaining = self.registry.count().await;
            tracing::info!(client = %id, remaining, "client disconnected");
        }
    }

    /// Relay a client-originated message to everyone except its sender.
    /// Returns the number of successful deliveries.
    pub async fn on_message(&self, source_id: &str, text: &str) -> usize {
        tracing::debug!(from = %source_id, len = text.len(), "relaying message");

        let recipients: Vec<ClientHandle> = self
            .registry
            .snapshot()
            .await
            .into_iter()
            .filter(|h| h.id != source_id)
            .collect();

        if recipients.is_empty() {
            tracing::debug!(from = %source_id, "no other clients to relay to");
            return 0;
        }

        self.fan_out(&recipients, text).await
    }

    /// Producer entry point: deliver to every connected client, no exclusion.
    /// Returns the number of successful deliveries.
    pub async fn publish(&self, text: &str) -> usize {
        tracing::debug!(len = text.len(), "publishing message");

        let recipients = self.registry.snapshot().await;
        if recipients.is_empty() {
            tracing::debug!("no clients connected, dropping publish");
            return 0;
        }

        self.fan_out(&recipients, text).await
    }

    /// Send to each recipient independently. A failed send means the peer
    /// task is gone; log it and prune the handle, then keep going.
    async fn fan_out(&self, recipients: &[ClientHandle], text: &str) -> usize {
        let mut delivered = 0;
        for handle in recipients {
            match handle.tx.send(text.to_string()) {
                Ok(()) => delivered += 1,
                Err(_) => {
                    tracing::warn!(client = %handle.id, "send failed, pruning client");
                    self.registry.remove(&handle.id).await;
                }
            }
        }

        tracing::debug!(delivered, of = recipients.len(), "fan-out complete");
        delivered
    }
}
