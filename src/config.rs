//! Process-wide session configuration.
//!
//! Configuration is read once at startup. A missing or short `JWT_SECRET` is
//! a fatal condition: [`SessionConfig::from_env`] fails and no requests
//! should be served.
//!
//! # Example
//!
//! ```rust
//! use uigen_auth::config::{Environment, SessionConfig};
//!
//! let config = SessionConfig::from_lookup(|key| match key {
//!     "JWT_SECRET" => Some("a-signing-secret-of-at-least-32-bytes".to_owned()),
//!     "APP_ENV" => Some("production".to_owned()),
//!     _ => None,
//! })
//! .unwrap();
//!
//! assert_eq!(config.environment(), Environment::Production);
//! assert!(config.cookie_secure());
//! ```

use std::str::FromStr;

use chrono::Duration;

use crate::{AuthError, SigningSecret};

/// The single cookie slot owned by this crate.
pub const SESSION_COOKIE_NAME: &str = "auth-token";

/// Path attribute of the session cookie.
pub const SESSION_COOKIE_PATH: &str = "/";

/// Environment variable holding the signing secret.
pub const SECRET_ENV_VAR: &str = "JWT_SECRET";

/// Environment variable selecting the deployment environment.
pub const ENVIRONMENT_ENV_VAR: &str = "APP_ENV";

/// Sessions last exactly this long; they are never extended, only reissued.
pub fn session_lifetime() -> Duration {
    Duration::days(7)
}

/// Deployment environment. Only decides the `secure` cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    /// Non-TLS development setups cannot carry a `secure` cookie.
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            other => Err(AuthError::ConfigurationError(format!(
                "{ENVIRONMENT_ENV_VAR} must be one of production, development, test; got \"{other}\""
            ))),
        }
    }
}

/// Immutable configuration shared by the issuer and the verifier.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    secret: SigningSecret,
    environment: Environment,
}

impl SessionConfig {
    pub fn new(secret: SigningSecret, environment: Environment) -> Self {
        Self {
            secret,
            environment,
        }
    }

    /// Loads configuration from the process environment.
    ///
    /// # Errors
    /// Returns `AuthError::ConfigurationError` if `JWT_SECRET` is unset or
    /// shorter than 32 bytes, or `APP_ENV` holds an unknown value.
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(SECRET_ENV_VAR).ok_or_else(|| {
            AuthError::ConfigurationError(format!("{SECRET_ENV_VAR} is not set"))
        })?;
        let secret = SigningSecret::new(secret)?;

        let environment = match lookup(ENVIRONMENT_ENV_VAR) {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => Environment::default(),
        };

        log::info!(
            target: "uigen_auth::config",
            "msg=\"session config loaded\", environment=\"{}\"",
            environment.as_str()
        );

        Ok(Self::new(secret, environment))
    }

    pub fn secret(&self) -> &SigningSecret {
        &self.secret
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Value of the cookie `secure` attribute.
    pub fn cookie_secure(&self) -> bool {
        self.environment.is_production()
    }
}
