//! Assembles the axum [`Router`] (spec.md §4.4 "HTTP routes" + "WebSocket
//! protocol"), grounded on the donor's `router()` (serve/src/app.rs).

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::{Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::auth;
use crate::http::{bridge, health, index};
use crate::state::AppState;
use crate::ws::ws_handler;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/bridge", post(bridge))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .route("/ws", get(ws_handler))
        .with_state(state)
}

async fn require_auth(
    State(state): State<AppState>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let presented = auth::extract_bearer(request.headers().get("authorization").and_then(|v| v.to_str().ok()));
    if auth::is_authorized(state.auth_token.as_deref(), state.trust_localhost, Some(remote.ip()), presented) {
        next.run(request).await
    } else {
        (StatusCode::UNAUTHORIZED, "unauthorized").into_response()
    }
}
