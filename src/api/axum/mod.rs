//! Axum integration: cookie transport, extractors, route guard and routes.

mod cookies;
mod error;
mod handlers;
mod middleware;
mod routes;

pub use cookies::SessionCookies;
pub use error::AppError;
pub use handlers::{session_logout, session_status};
pub use middleware::{SessionUser, require_session};
pub use routes::session_routes;
