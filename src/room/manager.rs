//! Registry of active rooms and which connection sits in which room.

use std::time::{Duration, Instant};

use dashmap::{DashMap, mapref::entry::Entry};

use crate::room::{Member, Room};
use crate::util::id::{ConnectionId, new_room_code};
use crate::ws::protocol::ServerEvent;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RoomError {
    #[error("room {0} not found")]
    NotFound(String),
}

/// Rooms keyed by code, plus a reverse index from connection to room code.
///
/// A room is only touched through closures run under its map entry lock, so
/// a handler's read, mutation and emits on one room never interleave with
/// another handler on the same room.
#[derive(Default)]
pub struct RoomManager {
    rooms: DashMap<String, Room>,
    memberships: DashMap<ConnectionId, String>,
}

impl RoomManager {
    pub fn new() -> Self { Self::default() }

    /// Allocate a fresh code, create the room with `creator` as its only player.
    pub fn create_room(&self, creator: Member) -> String {
        self.create_room_with(new_room_code, creator)
    }

    /// Like [`create_room`](Self::create_room) with a custom code source.
    /// Keeps drawing until a code is free.
    pub fn create_room_with<F>(&self, mut next_code: F, creator: Member) -> String
    where
        F: FnMut() -> String,
    {
        self.leave_current(creator.id);
        let creator_id = creator.id;
        let code = loop {
            match self.rooms.entry(next_code()) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    let code = slot.key().clone();
                    let mut room = Room::new(code.clone());
                    room.upsert(creator);
                    slot.insert(room);
                    break code;
                }
            }
        };
        self.memberships.insert(creator_id, code.clone());
        tracing::info!(room_code = %code, conn_id = %creator_id, "room created");
        code
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rooms.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Code of the room the connection currently sits in.
    pub fn room_of(&self, id: ConnectionId) -> Option<String> {
        self.memberships.get(&id).map(|r| r.value().clone())
    }

    pub fn with_room<T>(&self, code: &str, f: impl FnOnce(&Room) -> T) -> Option<T> {
        self.rooms.get(code).map(|room| f(&room))
    }

    pub fn with_room_mut<T>(&self, code: &str, f: impl FnOnce(&mut Room) -> T) -> Option<T> {
        self.rooms.get_mut(code).map(|mut room| f(&mut room))
    }

    /// Put `member` into the room, replacing any entry it already has there.
    ///
    /// A connection lives in at most one room, so it is first taken out of
    /// any other room it was in. `f` runs on the updated room before the
    /// entry lock is released.
    pub fn join_room<T>(
        &self,
        code: &str,
        member: Member,
        f: impl FnOnce(&Room) -> T,
    ) -> Result<T, RoomError> {
        if !self.rooms.contains_key(code) {
            return Err(RoomError::NotFound(code.to_string()));
        }
        if self.room_of(member.id).as_deref() != Some(code) {
            self.leave_current(member.id);
        }
        let id = member.id;
        let out = {
            // room may have been pruned between the check and here
            let mut room = self
                .rooms
                .get_mut(code)
                .ok_or_else(|| RoomError::NotFound(code.to_string()))?;
            room.upsert(member);
            f(&room)
        };
        self.memberships.insert(id, code.to_string());
        tracing::debug!(room_code = %code, conn_id = %id, "joined room");
        Ok(out)
    }

    /// Drop the connection from its room and tell the remaining players.
    /// Empty rooms are kept. Returns the code of the room it left.
    pub fn leave_current(&self, id: ConnectionId) -> Option<String> {
        let (_, code) = self.memberships.remove(&id)?;
        let mut room = self.rooms.get_mut(&code)?;
        room.remove(id)?;
        room.broadcast(&ServerEvent::UpdatePlayerList { players: room.player_names() });
        tracing::info!(room_code = %code, conn_id = %id, players = room.players().len(), "player left");
        Some(code)
    }

    /// Remove rooms that have no players and saw no activity for `max_idle`.
    pub fn prune_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let before = self.rooms.len();
        self.rooms.retain(|_, room| {
            !(room.is_empty() && now.duration_since(room.last_activity) >= max_idle)
        });
        let pruned = before.saturating_sub(self.rooms.len());
        if pruned > 0 {
            tracing::info!(pruned, remaining = self.rooms.len(), "pruned idle rooms");
        }
        pruned
    }
}
