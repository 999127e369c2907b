use axum::{debug_handler, extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{employees::store, AppError, AppResult, OrInternal};

use super::{password, Tokens};

const FAILED: &str = "Login failed";

#[derive(Deserialize)]
pub(crate) struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
pub(crate) struct LoginResponse {
    token: String,
    user: LoginUser,
}

#[derive(Serialize)]
struct LoginUser {
    email: String,
    name: String,
    department: String,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn login(
    State(db_pool): State<SqlitePool>,
    State(tokens): State<Tokens>,
    Json(LoginRequest { email, password }): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let Some(employee) = store::find_by_email(&db_pool, &email).await.or_500(FAILED)? else {
        return Err(AppError::NotFound("User not found"));
    };

    if !password::verify(password, employee.password.clone()).await.or_500(FAILED)? {
        tracing::debug!("bad password for {email}");
        return Err(AppError::Unauthorized("Invalid password"));
    }

    let token = tokens.issue(&employee.email, &employee.id).or_500(FAILED)?;

    tracing::info!("welcome {}", employee.email);
    Ok(Json(LoginResponse {
        token,
        user: LoginUser {
            email: employee.email,
            name: employee.name,
            department: employee.department,
        },
    }))
}
