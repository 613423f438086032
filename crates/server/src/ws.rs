//! WebSocket upgrade and per-connection recv loop, grounded on the donor's
//! `ws_handler`/`handle_socket` pair (serve/src/app.rs, serve/src/connection.rs).

use std::net::SocketAddr;
use std::sync::atomic::Ordering;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use serde::Deserialize;

use crate::auth;
use crate::dispatch::handle_frame;
use crate::frames::{ClientMessage, ServerFrame};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub token: Option<String>,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    Query(query): Query<WsQuery>,
    headers: HeaderMap,
) -> Response {
    let presented = query
        .token
        .or_else(|| auth::extract_bearer(headers.get("authorization").and_then(|v| v.to_str().ok())).map(|s| s.to_string()));

    if !auth::is_authorized(state.auth_token.as_deref(), state.trust_localhost, Some(remote.ip()), presented.as_deref()) {
        return Response::builder()
            .status(axum::http::StatusCode::UNAUTHORIZED)
            .body(axum::body::Body::from("unauthorized"))
            .unwrap_or_default();
    }

    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    state.clients.fetch_add(1, Ordering::SeqCst);
    let mut broadcast_rx = state.broadcast_tx.subscribe();

    let hello = ServerFrame::Hello {
        session_id: state.session.session_id().as_str().to_string(),
    };
    if send_frame(&mut socket, &hello).await.is_err() {
        state.clients.fetch_sub(1, Ordering::SeqCst);
        return;
    }

    loop {
        tokio::select! {
            biased;
            incoming = socket.recv() => {
                let Some(res) = incoming else { break };
                let msg = match res {
                    Ok(m) => m,
                    Err(e) => {
                        tracing::warn!(error = %e, "websocket read error");
                        break;
                    }
                };
                let text = match msg {
                    Message::Text(t) => t.to_string(),
                    Message::Binary(b) => String::from_utf8_lossy(&b).into_owned(),
                    Message::Close(_) => break,
                    _ => continue,
                };
                if handle_client_text(&state, &mut socket, &text).await.is_err() {
                    break;
                }
            }
            broadcast = broadcast_rx.recv() => {
                match broadcast {
                    Ok(frame) => {
                        if send_frame(&mut socket, &frame).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    state.clients.fetch_sub(1, Ordering::SeqCst);
}

async fn handle_client_text(state: &AppState, socket: &mut WebSocket, text: &str) -> Result<(), axum::Error> {
    let parsed: Result<ClientMessage, _> = serde_json::from_str(text);
    let (id, body) = match parsed {
        Ok(msg) => (msg.id, msg.body),
        Err(e) => {
            let frame = ServerFrame::Error {
                id: None,
                message: format!("parse error: {e}"),
            };
            return send_frame(socket, &frame).await;
        }
    };

    let reply = match handle_frame(state, body).await {
        Ok(frame) => attach_id(frame, id),
        Err(e) => ServerFrame::Error { id, message: e.to_string() },
    };
    send_frame(socket, &reply).await
}

fn attach_id(frame: ServerFrame, id: Option<String>) -> ServerFrame {
    match frame {
        ServerFrame::Ok { method, .. } => ServerFrame::Ok { id, method },
        ServerFrame::Error { message, .. } => ServerFrame::Error { id, message },
        other => other,
    }
}

async fn send_frame(socket: &mut WebSocket, frame: &ServerFrame) -> Result<(), axum::Error> {
    let text = serde_json::to_string(frame).unwrap_or_else(|_| "{\"type\":\"error\",\"message\":\"encode failure\"}".to_string());
    socket.send(Message::Text(text.into())).await
}
