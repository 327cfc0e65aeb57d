//! Shared helpers for HTTP-level integration tests.
//!
//! Uses Axum's `tower::ServiceExt::oneshot` to send requests directly to
//! the router without a TCP listener, with the same middleware stack as
//! production.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use slotbook_api::auth::jwt::{generate_token, JwtConfig};
use slotbook_api::config::ServerConfig;
use slotbook_api::router::build_app_router;
use slotbook_api::state::AppState;
use slotbook_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A `Bearer ...` header value for the given user.
#[allow(dead_code)]
pub fn bearer(user_id: DbId) -> String {
    let token = generate_token(user_id, &test_config().jwt).expect("token signing");
    format!("Bearer {token}")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

#[allow(dead_code)]
pub async fn seed_user(pool: &PgPool, name: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(format!("{}@example.com", name.to_lowercase()))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn seed_client(pool: &PgPool, name: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO clients (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    path: &str,
    auth: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn get(app: Router, path: &str, auth: Option<&str>) -> Response<Body> {
    send(app, Method::GET, path, auth, None).await
}

#[allow(dead_code)]
pub async fn post_json(
    app: Router,
    path: &str,
    auth: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, path, auth, Some(body)).await
}

#[allow(dead_code)]
pub async fn put_json(
    app: Router,
    path: &str,
    auth: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, path, auth, Some(body)).await
}

#[allow(dead_code)]
pub async fn delete(app: Router, path: &str, auth: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, path, auth, None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}
