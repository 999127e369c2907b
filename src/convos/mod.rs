mod messages;
pub mod store;

use axum::{routing::{get, post}, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::AppState;

/// One document of the `convos` collection.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    #[serde(rename = "_id")]
    pub id: String,
    pub participants: Vec<String>,
    pub messages: Vec<Value>,
}

/// A message addressed to a participant list. The message itself is whatever
/// the client sent; the server stores and relays it untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub participants: Vec<String>,
    pub message: Value,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/convos", get(messages::all_convos))
        .route("/messages", post(messages::messages).put(messages::save_message))
}
