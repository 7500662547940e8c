mod cookies;
mod handlers;
mod middleware;
mod routes;

pub use cookies::ActixCookies;
pub use handlers::{session_logout, session_status};
pub use middleware::{AuthenticationError, SessionUser};
pub use routes::session_routes;
