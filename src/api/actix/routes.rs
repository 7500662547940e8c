use actix_web::web;

use super::handlers::{session_logout, session_status};

/// Configures the session routes.
///
/// # Routes
///
/// - `GET /session` - current `AuthStatus` as JSON
/// - `POST /logout` - removes the session cookie
///
/// # Example
///
/// ```rust,ignore
/// App::new()
///     .app_data(web::Data::new(session_service))
///     .service(web::scope("/auth").configure(session_routes))
/// ```
pub fn session_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/session", web::get().to(session_status))
        .route("/logout", web::post().to(session_logout));
}
