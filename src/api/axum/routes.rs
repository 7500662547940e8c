use axum::Router;
use axum::extract::FromRef;
use axum::routing::{get, post};

use super::handlers;
use crate::session::SessionService;

/// Session routes, meant to be nested under e.g. `/auth`.
///
/// - `GET /session` - `{"isAuth":true,"userId":..,"email":..}` or `{"isAuth":false}`
/// - `POST /logout` - removes the session cookie
///
/// Logging in is left to the application: once its identity check passes it
/// calls [`SessionService::create_session`] with a
/// [`SessionCookies`](super::SessionCookies) transport.
pub fn session_routes<S>() -> Router<S>
where
    SessionService: FromRef<S>,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/session", get(handlers::session_status))
        .route("/logout", post(handlers::session_logout))
}
