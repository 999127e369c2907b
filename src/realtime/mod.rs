pub mod dispatch;
pub mod presence;
mod ws;

use axum::{routing::get, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::AppState;

pub use dispatch::Session;
pub use presence::{Connection, Presence};

/// Frames a client sends: `{"event": "...", "data": ...}`. A `sendMessage`
/// payload is relayed exactly as the client wrote it.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    Register(String),
    Typing { from: String, to: String },
    SendMessage(Value),
}

/// Frames the server pushes, same shape as [`ClientEvent`].
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    Typing { from: String },
    NewMessage(Value),
}

impl ServerEvent {
    pub fn frame(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::realtime_ws))
}
