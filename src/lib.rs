//! Signed, time-bounded login sessions carried in an HTTP cookie.
//!
//! A verified `(user_id, email)` pair is turned into an HS256-signed token
//! and stored in the `auth-token` cookie. Every request reads the cookie back
//! and either gets the typed [`SessionClaims`] or [`SessionState::Absent`].
//! There is no server-side session table.
//!
//! ```rust
//! use uigen_auth::config::{Environment, SessionConfig};
//! use uigen_auth::session::{InMemoryCookieJar, SessionService};
//! use uigen_auth::SigningSecret;
//!
//! let secret = SigningSecret::new("a-signing-secret-of-at-least-32-bytes").unwrap();
//! let service = SessionService::new(SessionConfig::new(secret, Environment::Development));
//!
//! let mut jar = InMemoryCookieJar::new();
//! service.create_session(&mut jar, "user-123", "test@example.com").unwrap();
//! assert!(service.verify_session(&jar).is_auth());
//!
//! service.delete_session(&mut jar).unwrap();
//! assert!(!service.verify_session(&jar).is_auth());
//! ```

use std::fmt;

pub mod api;
pub mod config;
pub mod secret;
pub mod session;

pub use config::{Environment, SessionConfig};
pub use secret::SigningSecret;
pub use session::{
    AuthStatus, CookieRecord, CookieTransport, InMemoryCookieJar, SessionClaims, SessionService,
    SessionState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Missing or unusable process configuration. Fatal at startup.
    ConfigurationError(String),
    /// Caller-supplied session identity was rejected.
    Validation(String),
    TokenExpired,
    TokenInvalid,
    /// No usable session on the request. Covers missing, tampered and
    /// expired cookies alike.
    Unauthenticated,
    /// The cookie transport could not apply a write or removal.
    Transport(String),
    Internal(String),
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
            AuthError::Validation(msg) => write!(f, "Validation error: {msg}"),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::TokenInvalid => write!(f, "Invalid token"),
            AuthError::Unauthenticated => write!(f, "Authentication required"),
            AuthError::Transport(msg) => write!(f, "Cookie transport error: {msg}"),
            AuthError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}
