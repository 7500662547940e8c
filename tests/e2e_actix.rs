//! End-to-end tests for the actix-web HTTP layer.
//!
//! Run with: `cargo test --features actix --test e2e_actix`

#![cfg(feature = "actix")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, test as actix_test, web};
use uigen_auth::api::actix::{ActixCookies, AuthenticationError, SessionUser, session_routes};
use uigen_auth::config::{Environment, SessionConfig};
use uigen_auth::session::SessionService;
use uigen_auth::SigningSecret;

const SECRET: &str = "integration-secret-32-bytes-long";

fn create_service(environment: Environment) -> SessionService {
    SessionService::new(SessionConfig::new(
        SigningSecret::new(SECRET).unwrap(),
        environment,
    ))
}

async fn login(
    service: web::Data<SessionService>,
    mut cookies: ActixCookies,
) -> Result<HttpResponse, AuthenticationError> {
    service.create_session(&mut cookies, "user-123", "test@example.com")?;

    let mut builder = HttpResponse::NoContent();
    cookies.apply(&mut builder);
    Ok(builder.finish())
}

async fn me(user: SessionUser) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "userId": user.user_id(), "email": user.email() }))
}

macro_rules! create_app {
    ($environment:expr) => {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new(create_service($environment)))
                .service(
                    web::scope("/auth")
                        .configure(session_routes)
                        .route("/login", web::post().to(login)),
                )
                .route("/me", web::get().to(me)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_login_sets_session_cookie() {
    let app = create_app!(Environment::Development);

    let req = actix_test::TestRequest::post().uri("/auth/login").to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let cookie = resp.response().cookies().next().unwrap();
    assert_eq!(cookie.name(), "auth-token");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_ne!(cookie.secure(), Some(true));
    assert!(cookie.expires().is_some());
}

#[actix_web::test]
async fn test_login_secure_in_production() {
    let app = create_app!(Environment::Production);

    let req = actix_test::TestRequest::post().uri("/auth/login").to_request();
    let resp = actix_test::call_service(&app, req).await;

    let cookie = resp.response().cookies().next().unwrap();
    assert_eq!(cookie.secure(), Some(true));
}

#[actix_web::test]
async fn test_session_roundtrip_and_logout() {
    let app = create_app!(Environment::Development);

    let req = actix_test::TestRequest::post().uri("/auth/login").to_request();
    let resp = actix_test::call_service(&app, req).await;
    let token = resp.response().cookies().next().unwrap().value().to_owned();

    let req = actix_test::TestRequest::get()
        .uri("/auth/session")
        .cookie(Cookie::new("auth-token", token.clone()))
        .to_request();
    let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["isAuth"], true);
    assert_eq!(body["userId"], "user-123");

    let req = actix_test::TestRequest::get()
        .uri("/me")
        .cookie(Cookie::new("auth-token", token.clone()))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = actix_test::TestRequest::post()
        .uri("/auth/logout")
        .cookie(Cookie::new("auth-token", token))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let removal = resp.response().cookies().next().unwrap();
    assert_eq!(removal.name(), "auth-token");
    assert_eq!(removal.value(), "");
}

#[actix_web::test]
async fn test_missing_and_tampered_are_unauthorized() {
    let app = create_app!(Environment::Development);

    let req = actix_test::TestRequest::get().uri("/me").to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = actix_test::TestRequest::get()
        .uri("/me")
        .cookie(Cookie::new("auth-token", "mock-jwt-token"))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = actix_test::TestRequest::get().uri("/auth/session").to_request();
    let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, serde_json::json!({ "isAuth": false }));
}

#[actix_web::test]
async fn test_logout_without_session() {
    let app = create_app!(Environment::Development);

    let req = actix_test::TestRequest::post().uri("/auth/logout").to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
