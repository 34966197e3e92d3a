//! Connect channel: online flags and connection events

use blink::backend::channels::ChannelKind;
use blink::backend::realtime::ConnectionHandle;

use crate::common::TestContext;

#[tokio::test]
async fn test_online_flags_follow_connections() {
    let ctx = TestContext::new();
    let alice = ctx.seed_user("alice").await;
    let bob = ctx.seed_user("bob").await;
    ctx.befriend(&alice, &bob).await;

    let mut bob_conn = ctx.open(ChannelKind::Connect, &bob).await;
    assert!(!ctx.reload(&bob).await.friends_list[0].is_online);

    let alice_conn = ctx.open(ChannelKind::Connect, &alice).await;
    assert!(ctx.presence.is_online(&alice.email).await);
    assert!(ctx.reload(&bob).await.friends_list[0].is_online);
    assert!(ctx.reload(&alice).await.friends_list[0].is_online);
    assert_eq!(
        bob_conn.drain(),
        vec![serde_json::json!({"type": "connection", "friendName": "alice", "isOnline": true})]
    );

    alice_conn.close().await;
    assert!(!ctx.presence.is_online(&alice.email).await);
    assert!(!ctx.reload(&bob).await.friends_list[0].is_online);
    assert_pushed!(bob_conn.drain(), "isOnline" => false);
}

#[tokio::test]
async fn test_stale_close_keeps_newer_connection() {
    let ctx = TestContext::new();
    let alice = ctx.seed_user("alice").await;

    let old = ctx.open(ChannelKind::Chat, &alice).await;
    let (newer, _rx) = ConnectionHandle::new();
    ctx.presence.register(&alice.email, newer.clone()).await;

    old.close().await;

    let current = ctx.presence.lookup(&alice.email).await.unwrap();
    assert_eq!(current.id, newer.id);
}

#[tokio::test]
async fn test_frames_on_connect_channel_are_ignored() {
    let ctx = TestContext::new();
    let alice = ctx.seed_user("alice").await;

    let mut conn = ctx.open(ChannelKind::Connect, &alice).await;
    conn.send("ping").await;
    conn.send(r#"{"type":"friendText"}"#).await;
    assert!(conn.drain().is_empty());
}
