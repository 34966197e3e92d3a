/**
 * Websocket Routes
 *
 * One upgrade route per channel. Every channel authenticates with the
 * `token` query parameter and is closed with 1008 when it is missing or
 * invalid.
 *
 * - `GET /connect` - Presence
 * - `GET /add_friend` - Send friend requests
 * - `GET /accept_friend_request` - Accept or reject friend requests
 * - `GET /chat` - Direct and group messages
 * - `GET /has_seen` - Read receipts
 * - `GET /create-group-chat` - Group chat creation
 */

use axum::routing::get;
use axum::Router;

use crate::backend::channels::{
    accept_friend_ws, add_friend_ws, chat_ws, connect_ws, create_group_chat_ws, has_seen_ws,
};
use crate::backend::server::state::AppState;

/// Configure websocket routes
pub fn configure_socket_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/connect", get(connect_ws))
        .route("/add_friend", get(add_friend_ws))
        .route("/accept_friend_request", get(accept_friend_ws))
        .route("/chat", get(chat_ws))
        .route("/has_seen", get(has_seen_ws))
        .route("/create-group-chat", get(create_group_chat_ws))
}
