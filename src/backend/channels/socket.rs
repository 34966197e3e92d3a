/**
 * Websocket Session Runner
 *
 * Upgrade handlers for every channel plus the loop that drives one session.
 *
 * # Session Lifecycle
 *
 * 1. The `token` query parameter is verified before the upgrade. On failure
 *    the socket is upgraded and immediately closed with 1008.
 * 2. The socket is split; a writer task drains the connection's queue and
 *    serializes each payload to a text frame.
 * 3. The connection is registered in presence and the channel's `on_open`
 *    runs.
 * 4. Frames are read and handled one at a time. Text frames are dispatched,
 *    binary frames are decoded as UTF-8 and dispatched, ping/pong frames are
 *    ignored, a close frame or the end of the stream ends the loop.
 * 5. The connection is unregistered and the channel's `on_close` runs.
 *
 * A `SessionFault` at any point closes the socket with 1011.
 */

use std::ops::ControlFlow;

use axum::{
    extract::{
        ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio_stream::wrappers::UnboundedReceiverStream;

use super::{ChannelKind, SessionContext};
use crate::backend::auth::sessions::{resolve_identity, Identity};
use crate::backend::realtime::{ConnectionHandle, Outgoing, PresenceRegistry};
use crate::backend::store::SharedStore;

/// Handshake query parameters
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    #[serde(default)]
    pub token: Option<String>,
}

/// Verify the handshake credential and upgrade
fn upgrade(
    kind: ChannelKind,
    ws: WebSocketUpgrade,
    query: TokenQuery,
    store: SharedStore,
    presence: PresenceRegistry,
) -> Response {
    match resolve_identity(query.token.as_deref()) {
        Ok(identity) => {
            ws.on_upgrade(move |socket| run_session(kind, socket, identity, store, presence))
        }
        Err(e) => {
            tracing::warn!("[Session] {} handshake rejected: {}", kind.path(), e);
            ws.on_upgrade(|mut socket| async move {
                let _ = socket
                    .send(Message::Close(Some(CloseFrame {
                        code: close_code::POLICY,
                        reason: "Invalid or missing token".into(),
                    })))
                    .await;
            })
        }
    }
}

/// Drive one session until the client disconnects or a fault occurs
pub async fn run_session(
    kind: ChannelKind,
    socket: WebSocket,
    identity: Identity,
    store: SharedStore,
    presence: PresenceRegistry,
) {
    let (mut sink, mut stream) = socket.split();
    let (connection, rx) = ConnectionHandle::new();

    let writer = tokio::spawn(async move {
        let mut queue = UnboundedReceiverStream::new(rx);
        while let Some(item) = queue.next().await {
            match item {
                Outgoing::Event(payload) => {
                    let text = match serde_json::to_string(&payload) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::error!("[Session] Failed to serialize {}: {}", payload.describe(), e);
                            continue;
                        }
                    };
                    if sink.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Outgoing::Close(code) => {
                    let _ = sink
                        .send(Message::Close(Some(CloseFrame {
                            code,
                            reason: "".into(),
                        })))
                        .await;
                    break;
                }
            }
        }
    });

    let ctx = SessionContext {
        identity,
        connection: connection.clone(),
        store,
        presence,
    };

    tracing::info!("[Session] {} opened for {}", kind.path(), ctx.identity.username);
    ctx.presence.register(&ctx.identity.email, connection.clone()).await;

    let mut close_with = close_code::NORMAL;

    let flow = match kind.on_open(&ctx).await {
        Ok(flow) => flow,
        Err(fault) => {
            tracing::error!("[Session] {} open failed for {}: {}", kind.path(), ctx.identity.email, fault);
            close_with = close_code::ERROR;
            ControlFlow::Break(())
        }
    };

    if flow.is_continue() {
        while let Some(frame) = stream.next().await {
            let text = match frame {
                Ok(Message::Text(text)) => text.to_string(),
                Ok(Message::Binary(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
                Ok(Message::Close(_)) => break,
                Ok(_) => continue,
                Err(e) => {
                    tracing::debug!("[Session] {} read error for {}: {}", kind.path(), ctx.identity.email, e);
                    break;
                }
            };

            if let Err(fault) = kind.on_frame(&ctx, &text).await {
                tracing::error!("[Session] {} fault for {}: {}", kind.path(), ctx.identity.email, fault);
                close_with = close_code::ERROR;
                break;
            }
        }
    }

    ctx.presence.unregister(&ctx.identity.email, connection.id).await;
    if let Err(fault) = kind.on_close(&ctx).await {
        tracing::error!("[Session] {} teardown failed for {}: {}", kind.path(), ctx.identity.email, fault);
    }

    connection.close(close_with);
    let _ = writer.await;
    tracing::info!("[Session] {} closed for {}", kind.path(), ctx.identity.username);
}

/// `GET /connect`
pub async fn connect_ws(
    ws: WebSocketUpgrade,
    Query(query): Query<TokenQuery>,
    State(store): State<SharedStore>,
    State(presence): State<PresenceRegistry>,
) -> Response {
    upgrade(ChannelKind::Connect, ws, query, store, presence)
}

/// `GET /add_friend`
pub async fn add_friend_ws(
    ws: WebSocketUpgrade,
    Query(query): Query<TokenQuery>,
    State(store): State<SharedStore>,
    State(presence): State<PresenceRegistry>,
) -> Response {
    upgrade(ChannelKind::AddFriend, ws, query, store, presence)
}

/// `GET /accept_friend_request`
pub async fn accept_friend_ws(
    ws: WebSocketUpgrade,
    Query(query): Query<TokenQuery>,
    State(store): State<SharedStore>,
    State(presence): State<PresenceRegistry>,
) -> Response {
    upgrade(ChannelKind::AcceptFriend, ws, query, store, presence)
}

/// `GET /chat`
pub async fn chat_ws(
    ws: WebSocketUpgrade,
    Query(query): Query<TokenQuery>,
    State(store): State<SharedStore>,
    State(presence): State<PresenceRegistry>,
) -> Response {
    upgrade(ChannelKind::Chat, ws, query, store, presence)
}

/// `GET /has_seen`
pub async fn has_seen_ws(
    ws: WebSocketUpgrade,
    Query(query): Query<TokenQuery>,
    State(store): State<SharedStore>,
    State(presence): State<PresenceRegistry>,
) -> Response {
    upgrade(ChannelKind::HasSeen, ws, query, store, presence)
}

/// `GET /create-group-chat`
pub async fn create_group_chat_ws(
    ws: WebSocketUpgrade,
    Query(query): Query<TokenQuery>,
    State(store): State<SharedStore>,
    State(presence): State<PresenceRegistry>,
) -> Response {
    upgrade(ChannelKind::CreateGroupChat, ws, query, store, presence)
}
