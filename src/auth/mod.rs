mod login;
pub mod password;
mod token;

use axum::{routing::post, Router};

use crate::AppState;

pub use token::{Claims, Tokens};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login::login))
}
