#![allow(
    clippy::print_stdout,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown
)]

//! Axum Cookie Session Server Example
//!
//! Shows how to issue, read and clear the signed `auth-token` session cookie.
//! Sessions are stateless: the cookie itself carries the signed claims.
//!
//! Run with: `JWT_SECRET=<at least 32 bytes> cargo run --example axum_session_server`
//!
//! Test endpoints:
//!   curl -i -c jar.txt -X POST http://localhost:8080/auth/login \
//!     -H "Content-Type: application/json" \
//!     -d '{"email": "demo@example.com", "password": "demo-password"}'
//!
//!   curl -b jar.txt http://localhost:8080/auth/session
//!
//!   curl -b jar.txt http://localhost:8080/api/projects
//!
//!   curl -i -b jar.txt -X POST http://localhost:8080/auth/logout

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use uigen_auth::api::axum::{AppError, SessionCookies, require_session, session_routes};
use uigen_auth::{AuthError, SessionClaims, SessionConfig, SessionService};

const DEMO_USER_ID: &str = "user-demo";
const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "demo-password";

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn login(
    State(service): State<SessionService>,
    mut cookies: SessionCookies,
    Json(body): Json<LoginRequest>,
) -> Result<(SessionCookies, StatusCode), AppError> {
    // Stand-in for a real credential check
    if body.email != DEMO_EMAIL || body.password != DEMO_PASSWORD {
        return Err(AppError(AuthError::Unauthenticated));
    }

    service.create_session(&mut cookies, DEMO_USER_ID, &body.email)?;
    Ok((cookies, StatusCode::NO_CONTENT))
}

async fn list_projects(Extension(claims): Extension<SessionClaims>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "owner": claims.user_id,
        "projects": [],
    }))
}

#[tokio::main]
async fn main() {
    // JWT_SECRET is required; APP_ENV=production turns on the Secure flag
    let config = SessionConfig::from_env().expect("JWT_SECRET must be set to at least 32 bytes");
    let service = SessionService::new(config);

    let protected = Router::new()
        .route("/api/projects", get(list_projects))
        .route_layer(axum::middleware::from_fn_with_state(
            service.clone(),
            require_session,
        ));

    let app = Router::new()
        .nest("/auth", session_routes().route("/login", post(login)))
        .merge(protected)
        .with_state(service);

    println!("Starting Axum session server on http://localhost:8080");
    println!("Endpoints:");
    println!("  POST /auth/login    - Sign in (sets the auth-token cookie)");
    println!("  GET  /auth/session  - Current session status");
    println!("  POST /auth/logout   - Clear the session cookie");
    println!("  GET  /api/projects  - Protected route (requires session)");
    println!();
    println!("Demo credentials: {DEMO_EMAIL} / {DEMO_PASSWORD}");

    let listener = TcpListener::bind("127.0.0.1:8080").await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
