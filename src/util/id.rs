//! ID utilities (room codes, connection ids).

use rand::Rng;
use ulid::Ulid;

/// Identifier of one live WebSocket connection.
pub type ConnectionId = Ulid;

/// Characters a room code is drawn from.
pub const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const ROOM_CODE_LEN: usize = 4;

/// Fresh id for an accepted connection.
pub fn new_connection_id() -> ConnectionId {
    Ulid::new()
}

/// Random 4-character room code. Uniqueness is the registry's job.
pub fn new_room_code() -> String {
    room_code_from(&mut rand::thread_rng())
}

pub fn room_code_from<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ROOM_CODE_LEN)
        .map(|_| ROOM_CODE_ALPHABET[rng.gen_range(0..ROOM_CODE_ALPHABET.len())] as char)
        .collect()
}

/// Canonical form of a user-typed room code.
pub fn normalize_room_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}
