use axum::{debug_handler, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::{AppResult, OrInternal};

use super::{store, Conversation, Envelope};

#[derive(Deserialize)]
pub(crate) struct MessagesQuery {
    participants: Vec<String>,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn all_convos(
    State(db_pool): State<SqlitePool>,
) -> AppResult<Json<Vec<Conversation>>> {
    let convos = store::find_all(&db_pool)
        .await
        .or_500("Could not fetch convos")?;
    Ok(Json(convos))
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn messages(
    State(db_pool): State<SqlitePool>,
    Json(MessagesQuery { participants }): Json<MessagesQuery>,
) -> AppResult<Json<Value>> {
    let messages = store::list_messages(&db_pool, &participants)
        .await
        .or_500("Error retrieving messages")?;
    Ok(Json(json!({ "messages": messages })))
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn save_message(
    State(db_pool): State<SqlitePool>,
    Json(Envelope { participants, message }): Json<Envelope>,
) -> AppResult<Json<Value>> {
    store::append_or_create(&db_pool, &participants, &message)
        .await
        .or_500("Error saving message")?;
    Ok(Json(json!({ "success": true })))
}
