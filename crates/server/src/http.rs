//! Plain HTTP surface: the static shell page, `/health`, and the `/bridge`
//! ingress for externally-originated events (spec.md §4.4 "HTTP routes").

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::frames::ServerFrame;
use crate::state::AppState;

const INDEX_HTML: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>gateway</title></head>
<body>connect a WebSocket client to this origin to talk to the gateway.</body>
</html>
"#;

pub async fn index() -> impl IntoResponse {
    let mut response = Response::new(INDEX_HTML.into());
    response
        .headers_mut()
        .insert("content-type", HeaderValue::from_static("text/html; charset=utf-8"));
    response
        .headers_mut()
        .insert("cross-origin-opener-policy", HeaderValue::from_static("same-origin"));
    response
        .headers_mut()
        .insert("cross-origin-embedder-policy", HeaderValue::from_static("require-corp"));
    response
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({"ok": true, "clients": state.client_count()}))
}

/// Re-broadcasts an externally-posted JSON event to every connected WS
/// client as `bridge_event`.
pub async fn bridge(State(state): State<AppState>, body: Option<Json<Value>>) -> Response {
    let Some(Json(mut value)) = body else {
        return (StatusCode::BAD_REQUEST, "invalid JSON body").into_response();
    };
    let event = value
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string());
    if let Value::Object(ref mut map) = value {
        map.remove("type");
    }
    state.broadcast(ServerFrame::BridgeEvent { event, rest: value });
    (StatusCode::OK, "ok").into_response()
}
