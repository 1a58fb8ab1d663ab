//! Per-event handlers: each reads or mutates the registry and emits events
//! to the caller or to the caller's room.

use crate::http::routes::AppState;
use crate::room::manager::{RoomError, RoomManager};
use crate::room::{EventSender, Member};
use crate::util::id::{ConnectionId, normalize_room_code};
use crate::words::WordBank;
use crate::ws::protocol::{ClientEvent, CreateRoom, JoinRoom, ServerEvent, StartGame};

/// The connection an event arrived on.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: ConnectionId,
    pub tx: EventSender,
}

impl Session {
    pub fn new(id: ConnectionId, tx: EventSender) -> Self { Self { id, tx } }

    /// Send to this connection only.
    pub fn reply(&self, event: ServerEvent) {
        let _ = self.tx.send(event);
    }

    fn member(&self, name: String) -> Member {
        Member { id: self.id, name, tx: self.tx.clone() }
    }
}

pub fn dispatch(state: &AppState, session: &Session, event: ClientEvent) {
    match event {
        ClientEvent::CreateRoom(req) => on_create_room(&state.rooms, session, req),
        ClientEvent::JoinRoom(req) => on_join_room(&state.rooms, session, req),
        ClientEvent::StartGame(req) => on_start_game(&state.rooms, &state.words, session, req),
    }
}

pub fn on_create_room(rooms: &RoomManager, session: &Session, CreateRoom { username }: CreateRoom) {
    let room_code = rooms.create_room(session.member(username.clone()));
    rooms.with_room(&room_code, |room| {
        room.broadcast(&ServerEvent::RoomCreated {
            room_code: room_code.clone(),
            players: room.summaries(),
        });
    });
    session.reply(ServerEvent::JoinSuccess { room_code, username, is_admin: true });
}

pub fn on_join_room(rooms: &RoomManager, session: &Session, JoinRoom { username, room_code }: JoinRoom) {
    let room_code = normalize_room_code(&room_code);
    let joined = rooms.join_room(&room_code, session.member(username.clone()), |room| {
        room.broadcast(&ServerEvent::UpdatePlayerList { players: room.player_names() });
    });
    match joined {
        Ok(()) => session.reply(ServerEvent::JoinSuccess { room_code, username, is_admin: false }),
        Err(RoomError::NotFound(code)) => {
            tracing::debug!(room_code = %code, conn_id = %session.id, "join for unknown room");
            session.reply(ServerEvent::error("Room not found"));
        }
    }
}

/// Unknown rooms and empty rooms are silently ignored.
pub fn on_start_game(rooms: &RoomManager, words: &WordBank, session: &Session, StartGame { room_code }: StartGame) {
    rooms.with_room_mut(&room_code, |room| {
        let Some(roles) = room.start_round(words, &mut rand::thread_rng()) else {
            tracing::debug!(%room_code, "start requested for empty room");
            return;
        };
        let players = roles.len();
        for (id, info) in roles {
            room.send_to(id, ServerEvent::GameStarted(info));
        }
        tracing::info!(%room_code, conn_id = %session.id, players, "round started");
    });
}

pub fn on_disconnect(rooms: &RoomManager, session: &Session) {
    match rooms.leave_current(session.id) {
        Some(code) => tracing::debug!(room_code = %code, conn_id = %session.id, "disconnected from room"),
        None => tracing::debug!(conn_id = %session.id, "disconnected outside any room"),
    }
}
