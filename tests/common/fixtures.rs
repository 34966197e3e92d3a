//! In-memory application fixtures
//!
//! `TestContext` owns one store and one presence registry and can hand out
//! either an in-process HTTP server or channel probes over the same state,
//! so REST calls and websocket events observe each other.

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

use blink::backend::auth::{create_token, Identity};
use blink::backend::channels::{ChannelKind, SessionContext};
use blink::backend::realtime::{ConnectionHandle, Outgoing, PresenceRegistry};
use blink::backend::routes::create_router;
use blink::backend::server::AppState;
use blink::backend::store::{DocumentStore, MemoryStore, UserUpdate};
use blink::shared::messaging::{FriendEntry, User};
use blink::shared::AppConfig;

use super::FailingStore;

/// Password of every seeded user
pub const PASSWORD: &str = "correct horse";

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub presence: PresenceRegistry,
    pub config: AppConfig,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            presence: PresenceRegistry::new(),
            config: AppConfig::default(),
        }
    }

    pub fn state(&self) -> AppState {
        AppState {
            store: self.store.clone(),
            presence: self.presence.clone(),
            config: self.config.clone(),
        }
    }

    pub fn router(&self) -> Router {
        create_router(self.state())
    }

    /// Router over the same presence registry whose writes always fail
    pub fn failing_router(&self) -> Router {
        create_router(AppState {
            store: Arc::new(FailingStore::new(self.store.clone())),
            presence: self.presence.clone(),
            config: self.config.clone(),
        })
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Insert `username` with email `<username>@example.com`
    pub async fn seed_user(&self, username: &str) -> User {
        let hash = bcrypt::hash(PASSWORD, 4).unwrap();
        let user = User::new(
            &Uuid::new_v4().to_string(),
            username,
            &format!("{}@example.com", username),
            &hash,
        );
        self.store.insert_user(user.clone()).await.unwrap();
        user
    }

    pub fn token_for(&self, user: &User) -> String {
        create_token(&user.email, &user.username, self.config.token_ttl_hours).unwrap()
    }

    /// Make two users friends without going through the channels
    pub async fn befriend(&self, a: &User, b: &User) {
        self.store
            .update(&a.user_id, UserUpdate::PushFriend(FriendEntry::describing(b)))
            .await
            .unwrap();
        self.store
            .update(&b.user_id, UserUpdate::PushFriend(FriendEntry::describing(a)))
            .await
            .unwrap();
    }

    pub async fn reload(&self, user: &User) -> User {
        self.store.find_by_id(&user.user_id).await.unwrap().unwrap()
    }

    /// Register a session for `user` on `kind` and run its open hook
    pub async fn open(&self, kind: ChannelKind, user: &User) -> Probe {
        let (connection, rx) = ConnectionHandle::new();
        self.presence.register(&user.email, connection.clone()).await;
        let ctx = SessionContext {
            identity: Identity {
                email: user.email.clone(),
                username: user.username.clone(),
            },
            connection,
            store: self.store.clone(),
            presence: self.presence.clone(),
        };
        let _ = kind.on_open(&ctx).await.unwrap();
        Probe { kind, ctx, rx }
    }
}

/// A session driven directly, with its outbound queue exposed
pub struct Probe {
    pub kind: ChannelKind,
    pub ctx: SessionContext,
    rx: UnboundedReceiver<Outgoing>,
}

impl Probe {
    /// Deliver one inbound text frame
    pub async fn send(&self, text: &str) {
        self.kind.on_frame(&self.ctx, text).await.unwrap();
    }

    /// Every payload queued so far, as JSON
    pub fn drain(&mut self) -> Vec<Value> {
        let mut out = Vec::new();
        while let Ok(item) = self.rx.try_recv() {
            if let Outgoing::Event(payload) = item {
                out.push(serde_json::to_value(payload).unwrap());
            }
        }
        out
    }

    /// Unregister and run the close hook, as the runner does on disconnect
    pub async fn close(self) {
        self.ctx
            .presence
            .unregister(&self.ctx.identity.email, self.ctx.connection.id)
            .await;
        self.kind.on_close(&self.ctx).await.unwrap();
    }
}
