pub mod appresult;
pub mod auth;
pub mod config;
pub mod convos;
pub mod db;
pub mod employees;
pub mod realtime;

use axum::{extract::FromRef, Router};
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use appresult::{AppError, AppResult, OrInternal};
pub use config::Config;

use auth::Tokens;
use realtime::Presence;

/// Frames a socket may fall behind on the broadcast before it starts losing
/// them.
const BROADCAST_CAPACITY: usize = 1024;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub tokens: Tokens,
    pub presence: Presence,
    pub tx: broadcast::Sender<String>,
}

impl AppState {
    /// Fresh state with nobody online.
    pub fn new(db_pool: SqlitePool, tokens: Tokens) -> AppState {
        AppState {
            db_pool,
            tokens,
            presence: Presence::default(),
            tx: broadcast::channel(BROADCAST_CAPACITY).0,
        }
    }
}

pub fn app(app_state: AppState) -> Router {
    Router::new()
        .merge(employees::router())
        .merge(auth::router())
        .merge(convos::router())
        .merge(realtime::router())

        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
