#![allow(dead_code)]

use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use staffchat::{app, auth::Tokens, db, AppState};

pub const SECRET: &str = "test-secret";

pub async fn server() -> (TestServer, AppState) {
    let db_pool = db::memory().await.unwrap();
    let state = AppState::new(db_pool, Tokens::new(SECRET));
    let server = TestServer::builder()
        .http_transport()
        .build(app(state.clone()))
        .unwrap();
    (server, state)
}

pub fn employee(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "department": "Engineering",
        "role": "Developer",
        "password": "hunter2",
    })
}

pub async fn create_employee(server: &TestServer, name: &str, email: &str) {
    let response = server.post("/employees").json(&employee(name, email)).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
}

pub async fn wait_until(mut check: impl FnMut() -> bool, what: &str) {
    for _ in 0..200 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting until {what}");
}

pub async fn wait_until_online(state: &AppState, identity: &str) {
    let presence = state.presence.clone();
    wait_until(|| presence.lookup(identity).is_some(), &format!("{identity} is online")).await;
}
