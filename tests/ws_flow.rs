//! End-to-end socket tests against a server on a random port.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use spyfall::{router, words::WordBank, AppState};
use tokio_tungstenite::tungstenite::Message;

type ClientWs = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

async fn start_server() -> String {
    let words = WordBank::from_json(r#"{"Animals": ["Cat", "Dog"]}"#).expect("valid bank");
    let app = router(AppState::new(words));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = listener.local_addr().expect("should have local addr").to_string();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn connect(addr: &str) -> ClientWs {
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("should connect");
    ws
}

async fn send(ws: &mut ClientWs, event: &str, data: Value) {
    let frame = json!({ "event": event, "data": data }).to_string();
    ws.send(Message::text(frame)).await.expect("should send");
}

/// Next server event as (name, data).
async fn recv(ws: &mut ClientWs) -> (String, Value) {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(2), ws.next())
            .await
            .expect("timed out waiting for event")
            .expect("stream ended")
            .expect("socket error");
        if let Message::Text(_) = msg {
            let v: Value = serde_json::from_str(msg.to_text().unwrap()).unwrap();
            return (v["event"].as_str().unwrap().to_string(), v["data"].clone());
        }
    }
}

async fn expect_event(ws: &mut ClientWs, name: &str) -> Value {
    let (event, data) = recv(ws).await;
    assert_eq!(event, name, "unexpected event with data {data}");
    data
}

#[tokio::test]
async fn create_join_start_and_disconnect() {
    let addr = start_server().await;

    let mut ann = connect(&addr).await;
    send(&mut ann, "create_room", json!({ "username": "Ann" })).await;
    let created = expect_event(&mut ann, "room_created").await;
    let code = created["room_code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 4);
    assert_eq!(created["players"][0]["name"], "Ann");
    let joined = expect_event(&mut ann, "join_success").await;
    assert_eq!(joined, json!({ "room_code": code, "username": "Ann", "is_admin": true }));

    let mut bob = connect(&addr).await;
    send(&mut bob, "join_room", json!({ "username": "Bob", "room_code": code.to_lowercase() })).await;
    let list = expect_event(&mut bob, "update_player_list").await;
    assert_eq!(list["players"], json!(["Ann", "Bob"]));
    let joined = expect_event(&mut bob, "join_success").await;
    assert_eq!(joined, json!({ "room_code": code, "username": "Bob", "is_admin": false }));
    let list = expect_event(&mut ann, "update_player_list").await;
    assert_eq!(list["players"], json!(["Ann", "Bob"]));

    send(&mut ann, "start_game", json!({ "room_code": code })).await;
    let ann_role = expect_event(&mut ann, "game_started").await;
    let bob_role = expect_event(&mut bob, "game_started").await;

    let (spy, civilian) = if ann_role["is_spy"] == true { (ann_role, bob_role) } else { (bob_role, ann_role) };
    assert_eq!(spy["is_spy"], true);
    assert_eq!(spy["word"], "???");
    assert_eq!(spy["role"], "Spy");
    assert_eq!(civilian["is_spy"], false);
    assert_eq!(civilian["role"], "Civilian");
    assert!(civilian["word"] == "Cat" || civilian["word"] == "Dog");
    for role in [&spy, &civilian] {
        assert_eq!(role["category"], "Animals");
        assert_eq!(role["possible_words"], json!(["Cat", "Dog"]));
    }

    bob.close(None).await.expect("should close");
    let list = expect_event(&mut ann, "update_player_list").await;
    assert_eq!(list["players"], json!(["Ann"]));
}

#[tokio::test]
async fn join_unknown_room_reports_error() {
    let addr = start_server().await;
    let mut bob = connect(&addr).await;

    send(&mut bob, "join_room", json!({ "username": "Bob", "room_code": "zzzz" })).await;
    let err = expect_event(&mut bob, "error").await;
    assert_eq!(err["message"], "Room not found");
}

#[tokio::test]
async fn malformed_payload_keeps_connection_usable() {
    let addr = start_server().await;
    let mut ann = connect(&addr).await;

    send(&mut ann, "create_room", json!({})).await;
    let err = expect_event(&mut ann, "error").await;
    assert!(err["message"].as_str().unwrap().contains("username"));

    send(&mut ann, "create_room", json!({ "username": "Ann" })).await;
    expect_event(&mut ann, "room_created").await;
    expect_event(&mut ann, "join_success").await;
}

#[tokio::test]
async fn start_on_unknown_room_is_silent() {
    let addr = start_server().await;
    let mut ann = connect(&addr).await;

    send(&mut ann, "start_game", json!({ "room_code": "QQQQ" })).await;
    send(&mut ann, "join_room", json!({ "username": "Ann", "room_code": "QQQQ" })).await;
    // the only reply is the join error, nothing from start_game
    let (event, _) = recv(&mut ann).await;
    assert_eq!(event, "error");
}
