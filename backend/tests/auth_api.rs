//! End-to-end tests for the authentication endpoints, driving the real router
//! against an in-memory SQLite database.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

use backend::database::MIGRATOR;
use backend::services::user_directory::SqliteUserDirectory;
use backend::state::AppState;
use backend::utils::jwt::{JwtTokenService, TokenService};

const TEST_SECRET: &str = "test-secret";

async fn setup() -> (Router, SqlitePool) {
    // A single connection keeps the in-memory database alive for the whole test.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();

    let state = AppState::new(
        Arc::new(SqliteUserDirectory::new(pool.clone())),
        Arc::new(JwtTokenService::new(TEST_SECRET, 3600)),
    );

    (backend::app(state), pool)
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn bearer_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers a user and returns the directory's reply (the created record).
async fn register_user(app: &Router, email: &str, password: &str) -> Value {
    let request = json_request(
        "POST",
        "/register",
        &json!({"name": "Ada", "lastname": "Lovelace", "email": email, "password": password}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

fn issue_token(user_id: &str, email: &str) -> String {
    JwtTokenService::new(TEST_SECRET, 3600)
        .issue(user_id, email)
        .unwrap()
}

#[tokio::test]
async fn register_rejects_missing_fields() {
    let (app, _pool) = setup().await;

    let payloads = [
        json!({"lastname": "B", "email": "a@b.com", "password": "x"}),
        json!({"name": "A", "email": "a@b.com", "password": "x"}),
        json!({"name": "A", "lastname": "B", "password": "x"}),
        json!({"name": "A", "lastname": "B", "email": "a@b.com"}),
        json!({"name": "", "lastname": "B", "email": "a@b.com", "password": "x"}),
    ];

    for payload in payloads {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/register", &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(
            body["message"],
            "[ERROR User Data Missing]: Please enter all fields"
        );
    }
}

#[tokio::test]
async fn register_stores_hashed_password_and_empty_collections() {
    let (app, pool) = setup().await;

    let body = register_user(&app, "ada@example.com", "x").await;

    assert!(body["id"].is_string());
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["categories"], json!([]));
    assert_eq!(body["movements"], json!([]));
    assert!(body.get("password_hash").is_none());

    let stored: String =
        sqlx::query_scalar("SELECT password_hash FROM users WHERE email = 'ada@example.com'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_ne!(stored, "x");
    assert!(bcrypt::verify("x", &stored).unwrap());
}

#[tokio::test]
async fn register_duplicate_email_reports_error_in_body() {
    let (app, _pool) = setup().await;

    register_user(&app, "ada@example.com", "x").await;

    let request = json_request(
        "POST",
        "/register",
        &json!({"name": "Ada", "lastname": "L", "email": "ada@example.com", "password": "y"}),
    );
    let response = app.clone().oneshot(request).await.unwrap();

    // Delegate errors keep status 200 and surface in the body.
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn login_rejects_missing_fields() {
    let (app, _pool) = setup().await;

    let payloads = [
        json!({"password": "x"}),
        json!({"email": "a@b.com"}),
        json!({"email": "", "password": "x"}),
    ];

    for payload in payloads {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/login", &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(
            body["message"],
            "[ERROR User Data Missing]: User cannot be logged"
        );
    }
}

#[tokio::test]
async fn login_sets_hashed_session_header() {
    let (app, _pool) = setup().await;

    let created = register_user(&app, "ada@example.com", "secret").await;
    let id = created["id"].as_str().unwrap().to_string();

    let request = json_request(
        "POST",
        "/login",
        &json!({"email": "ada@example.com", "password": "secret"}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let session = response
        .headers()
        .get("sessionid")
        .expect("sessionid header on successful login")
        .to_str()
        .unwrap()
        .to_string();

    // The header is a one-way hash of the id, not the id itself.
    assert_ne!(session, id);
    assert!(bcrypt::verify(&id, &session).unwrap());

    let body = body_json(response).await;
    assert_eq!(body["id"], id.as_str());
    assert!(body.get("error").is_none());
    assert!(body["access_token"].is_string());
}

#[tokio::test]
async fn failed_login_is_200_without_session_header() {
    let (app, _pool) = setup().await;

    register_user(&app, "ada@example.com", "secret").await;

    let request = json_request(
        "POST",
        "/login",
        &json!({"email": "ada@example.com", "password": "wrong"}),
    );
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("sessionid").is_none());

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid email or password");
    assert!(body.get("access_token").is_none());
}

#[tokio::test]
async fn me_requires_bearer_token() {
    let (app, _pool) = setup().await;

    let request = Request::builder()
        .method("GET")
        .uri("/me?id=whoever")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(bearer_request("GET", "/me?id=whoever", "not-a-token"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_without_id_is_unauthorised_message() {
    let (app, _pool) = setup().await;

    let created = register_user(&app, "ada@example.com", "secret").await;
    let id = created["id"].as_str().unwrap();
    let token = issue_token(id, "ada@example.com");

    for method in ["GET", "DELETE"] {
        let response = app
            .clone()
            .oneshot(bearer_request(method, "/me", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(
            body["message"],
            "You are not authorised to perform this action"
        );
    }
}

#[tokio::test]
async fn me_returns_user_without_password_hash() {
    let (app, _pool) = setup().await;

    let created = register_user(&app, "ada@example.com", "secret").await;
    let id = created["id"].as_str().unwrap();
    let token = issue_token(id, "ada@example.com");

    let response = app
        .clone()
        .oneshot(bearer_request("GET", &format!("/me?id={id}"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["email"], "ada@example.com");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn delete_me_requires_ownership() {
    let (app, _pool) = setup().await;

    let created = register_user(&app, "ada@example.com", "secret").await;
    let id = created["id"].as_str().unwrap();
    let token = issue_token(id, "ada@example.com");

    let response = app
        .clone()
        .oneshot(bearer_request("DELETE", "/me?id=someone-else", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn delete_me_removes_user() {
    let (app, pool) = setup().await;

    let created = register_user(&app, "ada@example.com", "secret").await;
    let id = created["id"].as_str().unwrap();
    let token = issue_token(id, "ada@example.com");

    let response = app
        .clone()
        .oneshot(bearer_request("DELETE", &format!("/me?id={id}"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "User deleted successfully");

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn logout_responds_with_disconnect_text() {
    let (app, _pool) = setup().await;

    let created = register_user(&app, "ada@example.com", "secret").await;
    let id = created["id"].as_str().unwrap();
    let token = issue_token(id, "ada@example.com");

    let response = app
        .clone()
        .oneshot(bearer_request("GET", "/logout", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"User disconnected");
}
