//! Friend request, acceptance, direct chat and read receipts end to end

use pretty_assertions::assert_eq;

use blink::backend::channels::ChannelKind;

use crate::common::TestContext;

#[tokio::test]
async fn test_request_accept_chat_and_read() {
    let ctx = TestContext::new();
    let alice = ctx.seed_user("alice").await;
    let bob = ctx.seed_user("bob").await;

    // Alice asks, Bob is listening for decisions
    let mut alice_add = ctx.open(ChannelKind::AddFriend, &alice).await;
    let mut bob_accept = ctx.open(ChannelKind::AcceptFriend, &bob).await;
    alice_add.send("bob").await;

    let to_alice = alice_add.drain();
    assert_eq!(to_alice.len(), 1);
    assert_eq!(to_alice[0]["message"], "Friend request sent to bob");
    let to_bob = bob_accept.drain();
    assert_eq!(to_bob[0]["status"], "pending");
    assert_eq!(to_bob[0]["notificationId"], to_alice[0]["notificationId"]);

    bob_accept
        .send(r#"{"senderEmail": "alice@example.com", "isAccepted": true}"#)
        .await;

    let alice_doc = ctx.reload(&alice).await;
    let bob_doc = ctx.reload(&bob).await;
    assert!(alice_doc.is_friend(&bob.user_id));
    assert!(bob_doc.is_friend(&alice.user_id));
    assert_eq!(alice_doc.notifications.len(), 1);
    assert_eq!(alice_doc.notifications[0].message, "bob accepted your friend request");
    assert_pushed!(alice_add.drain(), "status" => "complete");
    assert_pushed!(bob_accept.drain(), "displayMessage" => "You accepted alice's friend request");

    // Chat both ways
    let mut alice_chat = ctx.open(ChannelKind::Chat, &alice).await;
    let mut bob_chat = ctx.open(ChannelKind::Chat, &bob).await;
    alice_chat
        .send(r#"{"type":"friendText","friendName":"bob","text":"hey"}"#)
        .await;
    bob_chat
        .send(r#"{"type":"friendText","friendName":"alice","text":"hi!"}"#)
        .await;

    let alice_view = ctx.reload(&alice).await.friends_list[0].messages.clone();
    let bob_view = ctx.reload(&bob).await.friends_list[0].messages.clone();
    assert_eq!(alice_view.len(), 2);
    assert_eq!(
        alice_view.iter().map(|m| m.is_incoming).collect::<Vec<_>>(),
        vec![false, true]
    );
    assert_eq!(
        bob_view.iter().map(|m| m.is_incoming).collect::<Vec<_>>(),
        vec![true, false]
    );
    assert_eq!(alice_view[0].id, bob_view[0].id);
    assert_eq!(alice_chat.drain().len(), 2);
    assert_eq!(bob_chat.drain().len(), 2);

    // Bob reads; Alice's last outgoing message carries the marker
    let mut bob_seen = ctx.open(ChannelKind::HasSeen, &bob).await;
    bob_seen
        .send(&format!(r#"{{"friend_id":"{}"}}"#, alice.user_id))
        .await;

    let alice_view = ctx.reload(&alice).await.friends_list[0].messages.clone();
    assert!(alice_view.iter().all(|m| m.is_seen));
    assert!(alice_view[0].last_seen);
    assert_pushed!(alice_chat.drain(), "friendName" => "bob");
    assert_eq!(
        bob_seen.drain(),
        vec![serde_json::json!({"type": "hasSeen", "friendName": "alice", "lastSeen": true})]
    );
}

#[tokio::test]
async fn test_offline_recipient_sees_request_later() {
    let ctx = TestContext::new();
    let alice = ctx.seed_user("alice").await;
    let bob = ctx.seed_user("bob").await;

    let mut alice_add = ctx.open(ChannelKind::AddFriend, &alice).await;
    alice_add.send("bob@example.com").await;
    assert_eq!(alice_add.drain().len(), 1);

    let bob_doc = ctx.reload(&bob).await;
    assert_eq!(bob_doc.notifications.len(), 1);
    assert!(bob_doc.has_pending_request_from(&alice.user_id));
    assert!(ctx.reload(&alice).await.has_pending_request_to(&bob.user_id));
}

#[tokio::test]
async fn test_rejection_clears_both_inboxes() {
    let ctx = TestContext::new();
    let alice = ctx.seed_user("alice").await;
    let bob = ctx.seed_user("bob").await;

    let alice_add = ctx.open(ChannelKind::AddFriend, &alice).await;
    alice_add.send("bob").await;
    let mut bob_accept = ctx.open(ChannelKind::AcceptFriend, &bob).await;
    bob_accept
        .send(r#"{"senderEmail": "alice@example.com", "isAccepted": false}"#)
        .await;

    assert!(ctx.reload(&alice).await.notifications.is_empty());
    assert!(ctx.reload(&bob).await.notifications.is_empty());
    assert_pushed!(bob_accept.drain(), "status" => "rejected");

    // A new request is possible afterwards
    alice_add.send("bob").await;
    assert_eq!(ctx.reload(&bob).await.notifications.len(), 1);
}

#[tokio::test]
async fn test_chat_requires_friendship() {
    let ctx = TestContext::new();
    let alice = ctx.seed_user("alice").await;
    ctx.seed_user("bob").await;

    let mut chat = ctx.open(ChannelKind::Chat, &alice).await;
    chat.send(r#"{"type":"friendText","friendName":"bob","text":"hey"}"#)
        .await;
    assert_informed!(chat.drain(), "Friend not found");
}
