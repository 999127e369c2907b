use axum::{debug_handler, extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::{auth::password, AppError, AppResult, OrInternal};

use super::{store, NewEmployee};

const DUPLICATE: &str = "Email already registered";
const FAILED: &str = "Failed to create employee";

#[debug_handler(state = crate::AppState)]
pub(crate) async fn new_employee(
    State(db_pool): State<SqlitePool>,
    Json(NewEmployee { name, email, department, role, password }): Json<NewEmployee>,
) -> AppResult<(StatusCode, Json<Value>)> {
    if store::find_by_email(&db_pool, &email).await.or_500(FAILED)?.is_some() {
        return Err(AppError::BadRequest(DUPLICATE));
    }

    let password_hash = password::hash(password).await.or_500(FAILED)?;

    // a concurrent registration can still win the race to the unique index
    let id = match store::insert(&db_pool, &name, &email, &department, &role, &password_hash).await {
        Ok(id) => id,
        Err(err) if store::is_unique_violation(&err) => return Err(AppError::BadRequest(DUPLICATE)),
        Err(err) => return Err(AppError::internal(FAILED, err)),
    };

    tracing::info!("registered employee {email} as {id}");
    Ok((StatusCode::CREATED, Json(json!({ "message": "Employee registered" }))))
}
