//! Operations on the caller's document

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use blink::backend::channels::ChannelKind;
use blink::backend::store::{DocumentStore, UserUpdate};
use blink::shared::messaging::{GroupChatEntry, GroupMember, Notification, Theme};

use crate::common::TestContext;

#[tokio::test]
async fn test_notification_housekeeping() {
    let ctx = TestContext::new();
    let alice = ctx.seed_user("alice").await;
    let bob = ctx.seed_user("bob").await;
    let (_, incoming) = Notification::friend_request_pair(&bob, &alice);
    let notification_id = incoming.id.clone();
    ctx.store
        .update(&alice.user_id, UserUpdate::PushNotification(incoming))
        .await
        .unwrap();

    let server = ctx.server();
    let token = ctx.token_for(&alice);

    server
        .put("/users/mark_all_notifications_seen")
        .authorization_bearer(&token)
        .await
        .assert_json(&json!({"message": "All notifications marked as seen"}));
    assert!(ctx.reload(&alice).await.notifications[0].is_seen_by_user);

    server
        .delete("/users/delete_notification")
        .authorization_bearer(&token)
        .add_query_param("id", &notification_id)
        .await
        .assert_json(&json!({"message": "Notification deleted successfully"}));
    assert!(ctx.reload(&alice).await.notifications.is_empty());

    let response = server
        .delete("/users/delete_notification")
        .authorization_bearer(&token)
        .add_query_param("id", &notification_id)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["error"],
        "Notification not found or already deleted"
    );
}

#[tokio::test]
async fn test_friend_chat_operations() {
    let ctx = TestContext::new();
    let alice = ctx.seed_user("alice").await;
    let bob = ctx.seed_user("bob").await;
    ctx.befriend(&alice, &bob).await;

    let chat = ctx.open(ChannelKind::Chat, &alice).await;
    chat.send(r#"{"type":"friendText","friendName":"bob","text":"hello"}"#)
        .await;

    let server = ctx.server();
    let token = ctx.token_for(&alice);

    server
        .patch("/users/mute_friend_chat")
        .authorization_bearer(&token)
        .json(&json!({"friend_id": bob.user_id, "is_muted": true}))
        .await
        .assert_json(&json!({"message": "Chat is now muted"}));
    assert!(ctx.reload(&alice).await.friends_list[0].is_muted);

    server
        .patch("/users/mute_friend_chat")
        .authorization_bearer(&token)
        .json(&json!({"friend_id": "nobody", "is_muted": false}))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Clearing only touches the caller's copy
    server
        .delete("/users/delete_chat")
        .authorization_bearer(&token)
        .add_query_param("friendId", &bob.user_id)
        .await
        .assert_json(&json!({"message": "Chat messages cleared successfully"}));
    assert!(ctx.reload(&alice).await.friends_list[0].messages.is_empty());
    assert_eq!(ctx.reload(&bob).await.friends_list[0].messages.len(), 1);

    server
        .delete("/users/delete_friend")
        .authorization_bearer(&token)
        .add_query_param("friendId", &bob.user_id)
        .await
        .assert_json(&json!({"message": "bob removed from friends list"}));
    assert!(ctx.reload(&alice).await.friends_list.is_empty());
    assert!(ctx.reload(&bob).await.friends_list.is_empty());

    server
        .delete("/users/delete_friend")
        .authorization_bearer(&token)
        .add_query_param("friendId", &bob.user_id)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_group_chat_operations() {
    let ctx = TestContext::new();
    let alice = ctx.seed_user("alice").await;
    let bob = ctx.seed_user("bob").await;
    let members = vec![GroupMember::of(&alice), GroupMember::of(&bob)];
    for user in [&alice, &bob] {
        ctx.store
            .update(
                &user.user_id,
                UserUpdate::PushGroupChat(GroupChatEntry::for_holder("g1", &members, &user.email)),
            )
            .await
            .unwrap();
    }
    let chat = ctx.open(ChannelKind::Chat, &alice).await;
    chat.send(r#"{"type":"groupChatText","chatId":"g1","text":"yo"}"#)
        .await;

    let server = ctx.server();
    let token = ctx.token_for(&alice);

    server
        .patch("/users/mute_groupchat")
        .authorization_bearer(&token)
        .json(&json!({"chat_id": "g1", "is_muted": false}))
        .await
        .assert_json(&json!({"message": "Chat is unmuted"}));

    let response = server
        .patch("/users/mute_groupchat")
        .authorization_bearer(&token)
        .json(&json!({"chat_id": "missing", "is_muted": true}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Groupchat not found");

    server
        .delete("/users/delete-group-chat")
        .authorization_bearer(&token)
        .add_query_param("chatId", "g1")
        .await
        .assert_json(&json!({"message": "Group chat messages cleared successfully"}));
    assert!(ctx.reload(&alice).await.group_chats_list[0].messages.is_empty());
    assert_eq!(ctx.reload(&bob).await.group_chats_list[0].messages.len(), 1);
}

#[tokio::test]
async fn test_profile_updates() {
    let ctx = TestContext::new();
    let alice = ctx.seed_user("alice").await;
    let server = ctx.server();
    let token = ctx.token_for(&alice);

    let response = server
        .put("/users/change-avatar")
        .authorization_bearer(&token)
        .json(&json!({"avatar": "  "}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Avatar URL cannot be empty.");

    server
        .put("/users/change-avatar")
        .authorization_bearer(&token)
        .json(&json!({"avatar": "https://cdn/new.png"}))
        .await
        .assert_json(&json!({"message": "Avatar updated successfully"}));
    assert_eq!(ctx.reload(&alice).await.avatar, "https://cdn/new.png");

    server
        .post("/themes/save_theme")
        .authorization_bearer(&token)
        .json(&json!({"theme": "darkbloom"}))
        .await
        .assert_json(&json!({"message": "Theme updated successfully"}));
    assert_eq!(ctx.reload(&alice).await.theme, Theme::Darkbloom);

    let response = server
        .post("/themes/save_theme")
        .authorization_bearer(&token)
        .json(&json!({"theme": "neon"}))
        .await;
    assert!(response.status_code().is_client_error());
    assert_eq!(ctx.reload(&alice).await.theme, Theme::Darkbloom);
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let ctx = TestContext::new();
    let alice = ctx.seed_user("alice").await;
    let server = axum_test::TestServer::new(ctx.failing_router()).unwrap();

    let response = server
        .put("/users/mark_all_notifications_seen")
        .authorization_bearer(ctx.token_for(&alice))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({"error": "Internal server error", "status": 500}));
}
