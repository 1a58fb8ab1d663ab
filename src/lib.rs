//! Real-time "find the spy" party game server.
//!
//! Players gather in short-lived rooms over a WebSocket; starting a round
//! picks a secret word and one spy who only sees the category.

pub mod config;
pub mod http;
pub mod room;
pub mod telemetry;
pub mod util;
pub mod words;
pub mod ws;

pub use http::routes::{AppState, router};
