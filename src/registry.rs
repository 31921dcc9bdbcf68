//! Connection registry: the shared set of currently-connected clients.
//!
//! Membership is guarded by a single `RwLock`; broadcasts never iterate the
//! live map. They take a `snapshot()` under the read lock and send outside
//! it, so a slow recipient cannot block a connect or disconnect.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, RwLock};

/// Unique id for one accepted connection. Two connections from the same peer
/// get distinct ids.
pub type ClientId = String;

/// Outbound half of one connected client.
///
/// The `tx` feeds the connection task's writer loop; sending only fails once
/// that task has gone away, which is exactly when the handle should be pruned.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    pub id: ClientId,
    pub tx: mpsc::UnboundedSender<String>,
    pub connected_at: DateTime<Utc>,
}

impl ClientHandle {
    pub fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            tx,
            connected_at: Utc::now(),
        }
    }
}

/// Thread-safe membership set, keyed by connection id.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    clients: Arc<RwLock<HashMap<ClientId, ClientHandle>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a handle. Re-adding the same id is a no-op overwrite, so the
    /// set never holds two entries for one connection.
    pub async fn add(&self, handle: ClientHandle) {
        self.clients.write().await.insert(handle.id.clone(), handle);
    }

    /// Remove a handle if present. Removing an absent id is a silent no-op;
    /// returns whether anything was actually removed.
    pub async fn remove(&self, id: &str) -> bool {
        self.clients.write().await.remove(id).is_some()
    }

    /// Point-in-time copy of the current membership. Callers iterate this,
    /// never the live map, so concurrent connects and disconnects can't
    /// corrupt a broadcast round.
    pub async fn snapshot(&self) -> Vec<ClientHandle> {
        self.clients.read().await.values().cloned().collect()
    }

    /// Current membership size. Log/decision signal only.
    pub async fn count(&self) -> usize {
        self.clients.read().await.len()
    }
}
