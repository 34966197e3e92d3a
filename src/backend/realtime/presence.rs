/**
 * Presence Registry
 *
 * Maps a lower-cased email to the outbound queue of that user's most recent
 * connection. The registry is the only state shared between sessions.
 *
 * # Semantics
 *
 * - `register` overwrites any earlier entry (last connect wins)
 * - `unregister` only removes the entry if it still belongs to the
 *   connection that is going away, so a late teardown cannot evict a newer
 *   connection
 * - `push` is fire-and-forget: an absent or closed connection is not an error
 */

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::shared::Outbound;

/// Item queued for a socket's writer task
#[derive(Debug, Clone, PartialEq)]
pub enum Outgoing {
    /// Serialize and send as a text frame
    Event(Outbound),
    /// Send a close frame with this code and stop writing
    Close(u16),
}

/// Sending half of one connection's outbound queue
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    pub id: Uuid,
    tx: mpsc::UnboundedSender<Outgoing>,
}

impl ConnectionHandle {
    /// Create a handle and the receiver its writer task drains
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Outgoing>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                id: Uuid::new_v4(),
                tx,
            },
            rx,
        )
    }

    /// Queue a payload
    ///
    /// # Returns
    ///
    /// `false` if the writer side has gone away
    pub fn send(&self, payload: Outbound) -> bool {
        self.tx.send(Outgoing::Event(payload)).is_ok()
    }

    /// Ask the writer to close the socket with `code`
    pub fn close(&self, code: u16) -> bool {
        self.tx.send(Outgoing::Close(code)).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Process-wide map from email to live connection
#[derive(Debug, Clone, Default)]
pub struct PresenceRegistry {
    connections: Arc<RwLock<HashMap<String, ConnectionHandle>>>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handle` for `email`, replacing any earlier connection
    pub async fn register(&self, email: &str, handle: ConnectionHandle) {
        let key = email.to_lowercase();
        let mut connections = self.connections.write().await;
        if let Some(previous) = connections.insert(key.clone(), handle) {
            tracing::debug!("[Presence] {} replaced connection {}", key, previous.id);
        }
        tracing::info!("[Presence] Registered {} ({} online)", key, connections.len());
    }

    /// Remove the entry for `email` if it still belongs to connection `id`
    ///
    /// # Returns
    ///
    /// Whether an entry was removed
    pub async fn unregister(&self, email: &str, id: Uuid) -> bool {
        let key = email.to_lowercase();
        let mut connections = self.connections.write().await;
        match connections.get(&key) {
            Some(current) if current.id == id => {
                connections.remove(&key);
                tracing::info!("[Presence] Unregistered {} ({} online)", key, connections.len());
                true
            }
            Some(_) => {
                tracing::debug!("[Presence] Stale unregister for {} ignored", key);
                false
            }
            None => false,
        }
    }

    /// Current connection of `email`, if any
    pub async fn lookup(&self, email: &str) -> Option<ConnectionHandle> {
        self.connections
            .read()
            .await
            .get(&email.to_lowercase())
            .cloned()
    }

    pub async fn is_online(&self, email: &str) -> bool {
        self.lookup(email).await.is_some()
    }

    /// Queue `payload` for `email` if connected
    ///
    /// # Returns
    ///
    /// Whether the payload was queued
    pub async fn push(&self, email: &str, payload: Outbound) -> bool {
        match self.lookup(email).await {
            Some(handle) => {
                if handle.send(payload) {
                    true
                } else {
                    tracing::debug!("[Presence] Connection for {} already closed", email);
                    false
                }
            }
            None => false,
        }
    }

    /// Number of registered connections
    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.connections.read().await.is_empty()
    }
}
