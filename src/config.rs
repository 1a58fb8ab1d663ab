//! Configuration utilities (bind address, static files, word bank, room TTL)

use std::{env, net::{IpAddr, Ipv4Addr, SocketAddr}};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use crate::words::WordBank;

const DEFAULT_PORT: u16 = 5000;

/// Socket address to bind the server to.
///
/// Reads `HOST` and `PORT`, falling back to 0.0.0.0:5000 when either is
/// missing or unparseable.
pub fn server_addr() -> SocketAddr {
    let host = env::var("HOST")
        .ok()
        .and_then(|v| v.parse::<IpAddr>().ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    let port = env::var("PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    SocketAddr::new(host, port)
}

/// Directory served under `/static`. `STATIC_DIR` or `./static`.
pub fn static_dir() -> PathBuf {
    env::var("STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./static"))
}

/// Word bank used for rounds.
///
/// If `WORD_BANK_PATH` is set the file must hold a JSON object of
/// category -> word list; otherwise the built-in set is used.
pub fn word_bank() -> anyhow::Result<WordBank> {
    match env::var("WORD_BANK_PATH") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading word bank {path}"))?;
            WordBank::from_json(&raw).with_context(|| format!("loading word bank {path}"))
        }
        Err(_) => Ok(WordBank::builtin()),
    }
}

/// Idle TTL for empty rooms. `None` keeps rooms for the process lifetime.
pub fn room_idle_ttl() -> Option<Duration> {
    env::var("ROOM_IDLE_TTL_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}
