use std::net::SocketAddr;

use anyhow::Context;

use spyfall::{config, router, telemetry, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init()?;

    let words = config::word_bank()?;
    let state = AppState::new(words);

    if let Some(ttl) = config::room_idle_ttl() {
        let rooms = state.rooms.clone();
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(ttl);
            loop {
                tick.tick().await;
                rooms.prune_idle(ttl);
            }
        });
        tracing::info!(ttl_secs = ttl.as_secs(), "idle room sweep enabled");
    }

    let app = router(state);

    let addr: SocketAddr = config::server_addr();
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}
