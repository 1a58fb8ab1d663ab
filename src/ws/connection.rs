//! WebSocket connection lifecycle management.

use axum::{extract::State, response::IntoResponse};
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::http::routes::AppState;
use crate::util::id::new_connection_id;
use crate::ws::handlers::{self, Session};
use crate::ws::protocol::{self, ServerEvent};

pub async fn ws_handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

async fn handle_socket(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (sv_tx, mut sv_rx) = mpsc::unbounded_channel::<ServerEvent>();
    let session = Session::new(new_connection_id(), sv_tx);
    tracing::debug!(conn_id = %session.id, "ws connected");

    // forward server events to the socket
    let writer = tokio::spawn(async move {
        while let Some(event) = sv_rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!(%err, "failed to encode server event");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = ws_rx.next().await {
        match msg {
            Message::Text(text) => match protocol::decode(&text) {
                Ok(event) => handlers::dispatch(&state, &session, event),
                Err(err) => {
                    tracing::warn!(conn_id = %session.id, %err, "rejected client message");
                    session.reply(ServerEvent::error(format!("Bad message: {err}")));
                }
            },
            Message::Close(_) => break,
            Message::Binary(_) | Message::Ping(_) | Message::Pong(_) => {}
        }
    }

    handlers::on_disconnect(&state.rooms, &session);
    writer.abort();
    tracing::debug!(conn_id = %session.id, "ws closed");
}
