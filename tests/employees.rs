mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{create_employee, employee, server, SECRET};
use staffchat::auth::Tokens;

#[tokio::test]
async fn created_employee_reads_back_without_password() {
    let (server, _) = server().await;
    create_employee(&server, "Amy Pond", "amy@corp.io").await;

    let all: Vec<Value> = server.get("/employees").await.json();
    assert_eq!(all.len(), 1);
    let id = all[0]["_id"].as_str().unwrap().to_owned();

    let response = server.get(&format!("/employees/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let one: Value = response.json();
    assert_eq!(one["name"], "Amy Pond");
    assert_eq!(one["email"], "amy@corp.io");
    assert_eq!(one["department"], "Engineering");
    assert_eq!(one["role"], "Developer");
    assert!(one.get("password").is_none());
}

#[tokio::test]
async fn employees_are_listed_by_name() {
    let (server, _) = server().await;
    create_employee(&server, "Zoe", "zoe@corp.io").await;
    create_employee(&server, "Bea", "bea@corp.io").await;
    create_employee(&server, "Mia", "mia@corp.io").await;

    let all: Vec<Value> = server.get("/employees").await.json();
    let names: Vec<&str> = all.iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Bea", "Mia", "Zoe"]);
}

#[tokio::test]
async fn same_email_twice_is_rejected() {
    let (server, _) = server().await;
    create_employee(&server, "Amy", "amy@corp.io").await;

    let response = server.post("/employees").json(&employee("Other Amy", "amy@corp.io")).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({"error": "Email already registered"}));
}

#[tokio::test]
async fn unknown_id_is_null() {
    let (server, _) = server().await;
    let response = server.get("/employees/01890a5d-ac96-774b-bcce-b302099a8057").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), Value::Null);
}

#[tokio::test]
async fn malformed_id_is_a_server_error() {
    let (server, _) = server().await;
    let response = server.get("/employees/not-an-id").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({"error": "Invalid ID format"}));
}

#[tokio::test]
async fn login_returns_a_token_for_the_user() {
    let (server, _) = server().await;
    create_employee(&server, "Amy", "amy@corp.io").await;

    let response = server
        .post("/login")
        .json(&json!({"email": "amy@corp.io", "password": "hunter2"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["user"], json!({
        "email": "amy@corp.io",
        "name": "Amy",
        "department": "Engineering",
    }));

    let claims = Tokens::new(SECRET).verify(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.email, "amy@corp.io");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let (server, _) = server().await;
    create_employee(&server, "Amy", "amy@corp.io").await;

    let response = server
        .post("/login")
        .json(&json!({"email": "amy@corp.io", "password": "wrong"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>(), json!({"error": "Invalid password"}));
}

#[tokio::test]
async fn login_for_unknown_email_is_not_found() {
    let (server, _) = server().await;

    let response = server
        .post("/login")
        .json(&json!({"email": "ghost@corp.io", "password": "hunter2"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), json!({"error": "User not found"}));
}
