#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use mirai_client::{Client, ConnectTarget, Push, SessionOptions};
use mirai_core::entity::Event;
use mirai_core::protocol::Command;
use mirai_core::{FaultKind, MiraiError};

type Queries = mpsc::UnboundedSender<HashMap<String, String>>;

async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<HashMap<String, String>>,
    State(queries): State<Queries>,
) -> impl IntoResponse {
    let _ = queries.send(query);
    ws.on_upgrade(serve_socket)
}

/// Minimal peer: handshake, then one push and one reply per command.
async fn serve_socket(mut socket: WebSocket) {
    let hello = json!({ "syncId": "", "data": { "code": 0, "session": "E2E-SESSION" } });
    if socket.send(WsMessage::Text(hello.to_string())).await.is_err() {
        return;
    }

    while let Some(Ok(msg)) = socket.recv().await {
        let WsMessage::Text(text) = msg else { continue };
        let frame: Value = serde_json::from_str(&text).unwrap();

        let data = match (frame["command"].as_str(), frame["content"]["target"].as_i64()) {
            (Some("sendGroupMessage"), Some(111)) => json!({ "code": 0, "messageId": 42 }),
            (Some("sendGroupMessage"), _) => json!({ "code": 5, "msg": "group not found" }),
            _ => json!({ "code": 400 }),
        };

        let push = json!({ "syncId": "-1", "data": { "type": "BotOnlineEvent", "qq": 10001 } });
        let reply = json!({ "syncId": frame["syncId"].to_string(), "data": data });
        if socket.send(WsMessage::Text(push.to_string())).await.is_err()
            || socket.send(WsMessage::Text(reply.to_string())).await.is_err()
        {
            return;
        }
    }
}

async fn spawn_peer() -> (SocketAddr, mpsc::UnboundedReceiver<HashMap<String, String>>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let app = Router::new().route("/all", get(ws_handler)).with_state(tx);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, rx)
}

fn client_for(addr: SocketAddr) -> Client {
    Client::new(
        ConnectTarget::new("127.0.0.1", addr.port(), 10001, "INIT KEY&1"),
        SessionOptions::default(),
    )
}

fn group_message(target: i64) -> Command {
    Command::new(
        "sendGroupMessage",
        json!({ "target": target, "messageChain": [{ "type": "Plain", "text": "hi" }] }),
    )
}

async fn timeout<F: std::future::Future>(fut: F) -> F::Output {
    tokio::time::timeout(Duration::from_secs(5), fut)
        .await
        .expect("timed out")
}

#[tokio::test]
async fn send_group_message_returns_message_id() {
    let (addr, mut queries) = spawn_peer().await;
    let client = client_for(addr);

    let reply = timeout(client.send(&group_message(111))).await.unwrap();
    assert_eq!(reply["messageId"], 42);

    let query = queries.recv().await.unwrap();
    assert_eq!(query.get("verifyKey").map(String::as_str), Some("INIT KEY&1"));
    assert_eq!(query.get("qq").map(String::as_str), Some("10001"));

    // handshake frame arrived before the reply
    assert_eq!(client.session_key().await.as_deref(), Some("E2E-SESSION"));

    match timeout(client.receive()).await.unwrap() {
        Push::Event(Event::BotOnlineEvent(e)) => assert_eq!(e.qq, 10001),
        other => panic!("unexpected push {other:?}"),
    }

    client.close().await.unwrap();
    assert_eq!(client.session_key().await, None);
}

#[tokio::test]
async fn missing_group_is_target_not_exist() {
    let (addr, _queries) = spawn_peer().await;
    let client = client_for(addr);

    let err = timeout(client.send(&group_message(404))).await.unwrap_err();
    assert_eq!(err.fault_kind(), Some(FaultKind::TargetNotExist));
    assert_eq!(
        err.payload(),
        Some(&json!({ "code": 5, "msg": "group not found" }))
    );
}

#[tokio::test]
async fn convenience_send_and_reconnect_after_close() {
    let (addr, mut queries) = spawn_peer().await;
    let client = client_for(addr);

    assert_eq!(timeout(client.send_group_message(111, "hi")).await.unwrap(), 42);
    client.close().await.unwrap();

    // a later call dials a fresh connection
    assert_eq!(timeout(client.send_group_message(111, "again")).await.unwrap(), 42);
    queries.recv().await.unwrap();
    queries.recv().await.unwrap();
}

#[tokio::test]
async fn unreachable_peer_is_connect_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);
    let err = timeout(client.send(&group_message(111))).await.unwrap_err();
    assert!(matches!(err, MiraiError::Connect(_)), "{err:?}");
}
