//! HTTP routes: landing page, room page, health, socket endpoint.

use std::sync::Arc;

use askama::Template;
use axum::{extract::{Path, State}, response::{Html, IntoResponse, Redirect, Response}, routing::get, Router};
use axum::http::{header, Method, StatusCode};
use tower_http::{compression::CompressionLayer, cors::{Any, CorsLayer}, services::ServeDir, trace::TraceLayer};

use crate::config;
use crate::room::manager::RoomManager;
use crate::words::WordBank;
use crate::ws;

#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<RoomManager>,
    pub words: Arc<WordBank>,
}

impl AppState {
    pub fn new(words: WordBank) -> Self {
        Self { rooms: Arc::new(RoomManager::new()), words: Arc::new(words) }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate;

#[derive(Template)]
#[template(path = "game.html")]
struct GameTemplate {
    room_code: String,
}

pub fn router(state: AppState) -> Router {
    // compression stays off the socket upgrade
    let pages = Router::new()
        .route("/", get(index))
        .route("/game/:room_code", get(game))
        .nest_service("/static", ServeDir::new(config::static_dir()))
        .layer(CompressionLayer::new());

    Router::new()
        .merge(pages)
        .route("/healthz", get(healthz))
        .route("/ws", get(ws::connection::ws_handler))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET])
                .allow_headers([header::CONTENT_TYPE])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn render(tpl: impl Template) -> Response {
    match tpl.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(%err, "template render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
        }
    }
}

async fn index() -> Response { render(IndexTemplate) }

async fn healthz() -> &'static str { "ok" }

/// Room page; unknown codes go back to the landing page.
async fn game(Path(room_code): Path<String>, State(state): State<AppState>) -> Response {
    if !state.rooms.contains(&room_code) {
        return Redirect::to("/").into_response();
    }
    render(GameTemplate { room_code })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    use crate::room::Member;
    use crate::util::id::new_connection_id;

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn landing_page_and_health() {
        let app = router(AppState::new(WordBank::builtin()));
        let res = app.clone().oneshot(request("/")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app.oneshot(request("/healthz")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_room_redirects_home() {
        let app = router(AppState::new(WordBank::builtin()));
        let res = app.oneshot(request("/game/ZZZZ")).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn known_room_renders_page() {
        let state = AppState::new(WordBank::builtin());
        let (tx, _rx) = mpsc::unbounded_channel();
        let code = state.rooms.create_room(Member { id: new_connection_id(), name: "Ann".into(), tx });
        let app = router(state);

        let res = app.oneshot(request(&format!("/game/{code}"))).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
