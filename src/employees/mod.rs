mod lookup;
mod new;
pub mod store;

use axum::{routing::get, Router};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// A row of the `employees` collection.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    pub password: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees", get(lookup::all_employees).post(new::new_employee))
        .route("/employees/{id}", get(lookup::employee))
}
