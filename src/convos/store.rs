use serde_json::Value;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::Conversation;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error("malformed conversation document: {0}")]
    Json(#[from] serde_json::Error),
}

/// The stored lookup key. Exact JSON text of the list, so `[a,b]` and `[b,a]`
/// are different conversations.
fn key(participants: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(participants)
}

/// Appends `message` to the log for `participants`, creating the document on
/// first use. One statement, so racing writers for the same participants all
/// land in a single document.
pub async fn append_or_create(
    db_pool: &SqlitePool,
    participants: &[String],
    message: &Value,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        INSERT INTO convos (id, participants, messages) VALUES (?1, ?2, json_array(json(?3)))
        ON CONFLICT(participants) DO UPDATE SET messages = json_insert(convos.messages, '$[#]', json(?3))
        "#,
    )
    .bind(Uuid::now_v7().to_string())
    .bind(key(participants)?)
    .bind(serde_json::to_string(message)?)
    .execute(db_pool)
    .await?;
    Ok(())
}

/// Empty when nothing was ever sent to `participants`.
pub async fn list_messages(
    db_pool: &SqlitePool,
    participants: &[String],
) -> Result<Vec<Value>, StoreError> {
    let row: Option<(String,)> = sqlx::query_as("SELECT messages FROM convos WHERE participants=?")
        .bind(key(participants)?)
        .fetch_optional(db_pool)
        .await?;

    match row {
        Some((messages,)) => Ok(serde_json::from_str(&messages)?),
        None => Ok(Vec::new()),
    }
}

pub async fn find_all(db_pool: &SqlitePool) -> Result<Vec<Conversation>, StoreError> {
    let rows: Vec<(String, String, String)> =
        sqlx::query_as("SELECT id,participants,messages FROM convos ORDER BY rowid")
            .fetch_all(db_pool)
            .await?;

    rows.into_iter()
        .map(|(id, participants, messages)| -> Result<Conversation, StoreError> {
            Ok(Conversation {
                id,
                participants: serde_json::from_str(&participants)?,
                messages: serde_json::from_str(&messages)?,
            })
        })
        .collect()
}
