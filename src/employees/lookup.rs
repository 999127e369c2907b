use axum::{debug_handler, extract::{Path, State}, Json};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{AppError, AppResult, OrInternal};

use super::{store, Employee};

#[debug_handler(state = crate::AppState)]
pub(crate) async fn all_employees(
    State(db_pool): State<SqlitePool>,
) -> AppResult<Json<Vec<Employee>>> {
    let employees = store::find_all(&db_pool)
        .await
        .or_500("Could not fetch documents")?;
    Ok(Json(employees))
}

/// Answers `null` for a well-formed id that matches nothing.
#[debug_handler(state = crate::AppState)]
pub(crate) async fn employee(
    Path(id): Path<String>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Json<Option<Employee>>> {
    let id = Uuid::parse_str(&id)
        .map_err(|err| AppError::internal("Invalid ID format", err))?;

    let employee = store::find_by_id(&db_pool, id)
        .await
        .or_500("Could not fetch document")?;
    Ok(Json(employee))
}
