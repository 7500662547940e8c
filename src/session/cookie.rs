//! The session cookie record and the transport that carries it.

use chrono::{DateTime, Utc};
use cookie::Cookie;
use cookie::time::OffsetDateTime;

use crate::AuthError;
use crate::config::{SESSION_COOKIE_NAME, SESSION_COOKIE_PATH, SessionConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    None,
    #[default]
    Lax,
    Strict,
}

impl From<SameSite> for cookie::SameSite {
    fn from(same_site: SameSite) -> Self {
        match same_site {
            SameSite::None => cookie::SameSite::None,
            SameSite::Lax => cookie::SameSite::Lax,
            SameSite::Strict => cookie::SameSite::Strict,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAttributes {
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub secure: bool,
    pub expires: DateTime<Utc>,
}

impl CookieAttributes {
    /// Attributes of the session cookie. Only `secure` depends on the environment.
    pub fn for_session(config: &SessionConfig, expires: DateTime<Utc>) -> Self {
        Self {
            http_only: true,
            same_site: SameSite::Lax,
            path: SESSION_COOKIE_PATH.to_owned(),
            secure: config.cookie_secure(),
            expires,
        }
    }
}

/// A named cookie value plus its attributes, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub attributes: CookieAttributes,
}

impl CookieRecord {
    pub fn session(value: String, attributes: CookieAttributes) -> Self {
        Self {
            name: SESSION_COOKIE_NAME.to_owned(),
            value,
            attributes,
        }
    }

    /// Builds the `cookie` crate representation used by HTTP adapters.
    pub fn to_cookie(&self) -> Cookie<'static> {
        let mut builder = Cookie::build((self.name.clone(), self.value.clone()))
            .path(self.attributes.path.clone())
            .secure(self.attributes.secure)
            .http_only(self.attributes.http_only)
            .same_site(self.attributes.same_site.into());

        if let Some(expires) = to_offset_date_time(self.attributes.expires) {
            builder = builder.expires(expires);
        }

        builder.build()
    }

    /// Renders the record as a `Set-Cookie` header value.
    pub fn to_header_value(&self) -> String {
        self.to_cookie().to_string()
    }
}

/// A cookie that instructs the client to drop `name`.
#[cfg_attr(not(feature = "axum_support"), allow(dead_code))]
pub fn removal_cookie(name: &str) -> Cookie<'static> {
    let mut cookie = Cookie::build((name.to_owned(), ""))
        .path(SESSION_COOKIE_PATH)
        .build();
    cookie.make_removal();
    cookie
}

fn to_offset_date_time(at: DateTime<Utc>) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(at.timestamp()).ok()
}

/// Read/write access to the cookies of one request/response pair.
///
/// The session service only ever touches the `auth-token` slot.
pub trait CookieTransport {
    /// Raw value of the named cookie on the current request.
    fn get(&self, name: &str) -> Option<String>;

    /// Writes `record` into the response.
    ///
    /// # Errors
    /// Returns `AuthError::Transport` when the write cannot be applied.
    fn set(&mut self, record: CookieRecord) -> Result<(), AuthError>;

    /// Instructs the client to drop the named cookie. Removing a cookie
    /// that is not present is not an error.
    ///
    /// # Errors
    /// Returns `AuthError::Transport` when the removal cannot be applied.
    fn delete(&mut self, name: &str) -> Result<(), AuthError>;
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::config::Environment;
    use crate::SigningSecret;

    fn config(environment: Environment) -> SessionConfig {
        SessionConfig::new(
            SigningSecret::new("test-secret-32-bytes-long-key-01").unwrap(),
            environment,
        )
    }

    #[test]
    fn test_attributes_constant_across_environments() {
        let expires = Utc::now() + Duration::days(7);
        let prod = CookieAttributes::for_session(&config(Environment::Production), expires);
        let dev = CookieAttributes::for_session(&config(Environment::Development), expires);

        assert!(prod.secure);
        assert!(!dev.secure);

        for attrs in [&prod, &dev] {
            assert!(attrs.http_only);
            assert_eq!(attrs.same_site, SameSite::Lax);
            assert_eq!(attrs.path, "/");
            assert_eq!(attrs.expires, expires);
        }
    }

    #[test]
    fn test_header_value() {
        let expires = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
        let record = CookieRecord::session(
            "abc.def.ghi".to_owned(),
            CookieAttributes::for_session(&config(Environment::Production), expires),
        );

        let header = record.to_header_value();
        assert!(header.starts_with("auth-token=abc.def.ghi"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Lax"));
        assert!(header.contains("Secure"));
        assert!(header.contains("Path=/"));
        assert!(header.contains("Expires=Wed, 02 Jan 2030 03:04:05 GMT"));
    }

    #[test]
    fn test_header_value_without_secure() {
        let record = CookieRecord::session(
            "token".to_owned(),
            CookieAttributes::for_session(&config(Environment::Development), Utc::now()),
        );
        assert!(!record.to_header_value().contains("Secure"));
    }

    #[test]
    fn test_removal_cookie() {
        let removal = removal_cookie("auth-token");
        assert_eq!(removal.name(), "auth-token");
        assert_eq!(removal.value(), "");
        assert_eq!(removal.path(), Some("/"));
        assert_eq!(removal.max_age(), Some(cookie::time::Duration::ZERO));
    }
}
