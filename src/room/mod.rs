//! Room state, players and round (role) assignment.

pub mod manager;

use std::time::Instant;

use rand::Rng;
use rand::seq::SliceRandom;
use tokio::sync::mpsc;

use crate::util::id::ConnectionId;
use crate::words::WordBank;
use crate::ws::protocol::{PlayerSummary, RoleInfo, ServerEvent};

/// Word shown to the spy instead of the secret.
pub const SPY_PLACEHOLDER: &str = "???";
pub const SPY_ROLE: &str = "Spy";
pub const CIVILIAN_ROLE: &str = "Civilian";

pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// A connection entering a room: who it is and where its events go.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: ConnectionId,
    pub name: String,
    pub tx: EventSender,
}

#[derive(Debug)]
pub struct Player {
    pub id: ConnectionId,
    pub name: String,
    pub is_spy: bool,
    /// Secret word as this player sees it; `None` for the spy and before a round.
    pub word: Option<String>,
    tx: EventSender,
}

impl Player {
    fn new(member: Member) -> Self {
        Self { id: member.id, name: member.name, is_spy: false, word: None, tx: member.tx }
    }

    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary { name: self.name.clone(), is_spy: self.is_spy, word: self.word.clone() }
    }

    fn send(&self, event: ServerEvent) {
        // receiver gone means the socket is closing; disconnect cleans up
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub category: String,
    pub word: String,
    pub spy_id: ConnectionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoomState {
    #[default]
    Lobby,
    Playing(Round),
}

#[derive(Debug)]
pub struct Room {
    pub code: String,
    pub state: RoomState,
    /// Join order; a rejoining connection keeps its slot.
    players: Vec<Player>,
    pub(crate) last_activity: Instant,
}

impl Room {
    pub fn new(code: String) -> Self {
        Self { code, state: RoomState::Lobby, players: Vec::new(), last_activity: Instant::now() }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: ConnectionId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player_names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    pub fn summaries(&self) -> Vec<PlayerSummary> {
        self.players.iter().map(Player::summary).collect()
    }

    /// Insert the member or overwrite the entry it already has.
    pub(crate) fn upsert(&mut self, member: Member) {
        let player = Player::new(member);
        match self.players.iter_mut().find(|p| p.id == player.id) {
            Some(slot) => *slot = player,
            None => self.players.push(player),
        }
        self.touch();
    }

    pub(crate) fn remove(&mut self, id: ConnectionId) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == id)?;
        self.touch();
        Some(self.players.remove(idx))
    }

    /// Send to every player in the room.
    pub fn broadcast(&self, event: &ServerEvent) {
        for p in &self.players {
            p.send(event.clone());
        }
    }

    pub fn send_to(&self, id: ConnectionId, event: ServerEvent) {
        if let Some(p) = self.player(id) {
            p.send(event);
        }
    }

    /// Draw a category and word, pick one spy and record everyone's role.
    ///
    /// Returns the private payload for each player, or `None` without
    /// touching the room when it has no players.
    pub fn start_round<R: Rng + ?Sized>(
        &mut self,
        bank: &WordBank,
        rng: &mut R,
    ) -> Option<Vec<(ConnectionId, RoleInfo)>> {
        if self.players.is_empty() {
            return None;
        }
        let pick = bank.pick(rng)?;
        let spy_id = self.players.choose(rng)?.id;

        let mut roles = Vec::with_capacity(self.players.len());
        for p in self.players.iter_mut() {
            let is_spy = p.id == spy_id;
            p.is_spy = is_spy;
            p.word = (!is_spy).then(|| pick.word.to_string());
            roles.push((p.id, RoleInfo {
                is_spy,
                word: if is_spy { SPY_PLACEHOLDER.to_string() } else { pick.word.to_string() },
                role: (if is_spy { SPY_ROLE } else { CIVILIAN_ROLE }).to_string(),
                category: pick.category.to_string(),
                possible_words: pick.candidates.to_vec(),
            }));
        }

        self.state = RoomState::Playing(Round {
            category: pick.category.to_string(),
            word: pick.word.to_string(),
            spy_id,
        });
        self.touch();
        Some(roles)
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}
