//! Real websocket sessions against a bound listener

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::common::TestContext;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn serve(ctx: &TestContext) -> SocketAddr {
    serve_router(ctx.router()).await
}

async fn serve_router(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn dial(addr: SocketAddr, path: &str, token: Option<&str>) -> Client {
    let url = match token {
        Some(token) => format!("ws://{}{}?token={}", addr, path, token),
        None => format!("ws://{}{}", addr, path),
    };
    let (client, _) = connect_async(url).await.unwrap();
    client
}

/// Next data frame as JSON, or the close code
async fn next_frame(client: &mut Client) -> Result<Value, u16> {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), client.next())
            .await
            .expect("timed out waiting for a frame");
        match frame {
            Some(Ok(Message::Text(text))) => return Ok(serde_json::from_str(text.as_str()).unwrap()),
            Some(Ok(Message::Close(Some(frame)))) => return Err(u16::from(frame.code)),
            Some(Ok(Message::Close(None))) | None => return Err(1005),
            Some(Ok(_)) => continue,
            Some(Err(e)) => panic!("socket error: {}", e),
        }
    }
}

#[tokio::test]
async fn test_missing_token_closes_with_policy_violation() {
    let ctx = TestContext::new();
    let addr = serve(&ctx).await;

    let mut client = dial(addr, "/chat", None).await;
    assert_eq!(next_frame(&mut client).await, Err(1008));

    let mut client = dial(addr, "/add_friend", Some("garbage")).await;
    assert_eq!(next_frame(&mut client).await, Err(1008));
}

#[tokio::test]
async fn test_friend_request_over_sockets() {
    let ctx = TestContext::new();
    let alice = ctx.seed_user("alice").await;
    let bob = ctx.seed_user("bob").await;
    let addr = serve(&ctx).await;

    let mut bob_client = dial(addr, "/accept_friend_request", Some(&ctx.token_for(&bob))).await;
    let mut alice_client = dial(addr, "/add_friend", Some(&ctx.token_for(&alice))).await;

    // Both sessions must be registered before the request is sent
    for _ in 0..50 {
        if ctx.presence.len().await == 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    alice_client.send(Message::text("nobody")).await.unwrap();
    assert_eq!(
        next_frame(&mut alice_client).await,
        Ok(serde_json::json!({"message": "User not found"}))
    );

    alice_client.send(Message::binary(b"bob".to_vec())).await.unwrap();
    let to_alice = next_frame(&mut alice_client).await.unwrap();
    assert_eq!(to_alice["message"], "Friend request sent to bob");
    let to_bob = next_frame(&mut bob_client).await.unwrap();
    assert_eq!(to_bob["status"], "pending");

    bob_client
        .send(Message::text(
            r#"{"senderEmail":"alice@example.com","isAccepted":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(next_frame(&mut alice_client).await.unwrap()["status"], "complete");
    assert_eq!(next_frame(&mut bob_client).await.unwrap()["status"], "complete");
    assert!(ctx.reload(&alice).await.is_friend(&bob.user_id));

    alice_client.close(None).await.unwrap();
    for _ in 0..50 {
        if !ctx.presence.is_online(&alice.email).await {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(!ctx.presence.is_online(&alice.email).await);
}

#[tokio::test]
async fn test_store_failure_closes_with_internal_error() {
    let ctx = TestContext::new();
    let alice = ctx.seed_user("alice").await;
    let bob = ctx.seed_user("bob").await;
    ctx.befriend(&alice, &bob).await;
    let addr = serve_router(ctx.failing_router()).await;

    let mut client = dial(addr, "/chat", Some(&ctx.token_for(&alice))).await;
    client
        .send(Message::text(
            r#"{"type":"friendText","friendName":"bob","text":"hello?"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(next_frame(&mut client).await, Err(1011));
    // Teardown unregisters before the close frame is queued
    assert!(!ctx.presence.is_online(&alice.email).await);
    assert!(ctx.presence.is_empty().await);
    assert!(ctx.reload(&alice).await.friends_list[0].messages.is_empty());
}
