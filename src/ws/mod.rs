pub mod connection;
pub mod handlers;
pub mod protocol;
