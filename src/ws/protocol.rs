//! JSON messages exchanged over the socket.
//!
//! Every frame is `{"event": "<name>", "data": {...}}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    CreateRoom(CreateRoom),
    JoinRoom(JoinRoom),
    StartGame(StartGame),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoom {
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinRoom {
    pub username: String,
    pub room_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartGame {
    pub room_code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    RoomCreated { room_code: String, players: Vec<PlayerSummary> },
    JoinSuccess { room_code: String, username: String, is_admin: bool },
    Error { message: String },
    UpdatePlayerList { players: Vec<String> },
    GameStarted(RoleInfo),
}

impl ServerEvent {
    pub fn error(message: impl Into<String>) -> Self {
        ServerEvent::Error { message: message.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    pub is_spy: bool,
    pub word: Option<String>,
}

/// What one player learns when a round starts. Always sent privately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleInfo {
    pub is_spy: bool,
    pub word: String,
    pub role: String,
    pub category: String,
    pub possible_words: Vec<String>,
}

/// Decode one text frame.
pub fn decode(text: &str) -> Result<ClientEvent, serde_json::Error> {
    serde_json::from_str(text)
}
