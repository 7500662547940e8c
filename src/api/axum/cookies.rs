use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum::response::{IntoResponse, IntoResponseParts, Response, ResponseParts};
use axum_extra::extract::cookie::CookieJar;

use crate::AuthError;
use crate::session::{CookieRecord, CookieTransport, removal_cookie};

/// Cookie transport over `axum_extra`'s [`CookieJar`].
///
/// Extract it in a handler, hand it to the session service, then return it
/// as part of the response so the `Set-Cookie` headers are emitted.
///
/// ```rust,ignore
/// async fn login(
///     State(service): State<SessionService>,
///     mut cookies: SessionCookies,
/// ) -> Result<(SessionCookies, StatusCode), AppError> {
///     service.create_session(&mut cookies, "user-123", "test@example.com")?;
///     Ok((cookies, StatusCode::NO_CONTENT))
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionCookies {
    jar: CookieJar,
}

impl SessionCookies {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            jar: CookieJar::from_headers(headers),
        }
    }

    pub fn into_inner(self) -> CookieJar {
        self.jar
    }
}

impl From<CookieJar> for SessionCookies {
    fn from(jar: CookieJar) -> Self {
        Self { jar }
    }
}

impl CookieTransport for SessionCookies {
    fn get(&self, name: &str) -> Option<String> {
        // a removal written earlier in this request leaves an empty value behind
        self.jar
            .get(name)
            .map(|cookie| cookie.value().to_owned())
            .filter(|value| !value.is_empty())
    }

    fn set(&mut self, record: CookieRecord) -> Result<(), AuthError> {
        let jar = std::mem::take(&mut self.jar);
        self.jar = jar.add(record.to_cookie());
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<(), AuthError> {
        let jar = std::mem::take(&mut self.jar);
        self.jar = jar.add(removal_cookie(name));
        Ok(())
    }
}

impl<S> FromRequestParts<S> for SessionCookies
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

impl IntoResponseParts for SessionCookies {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.jar.into_response_parts(res)
    }
}

impl IntoResponse for SessionCookies {
    fn into_response(self) -> Response {
        self.jar.into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header::{COOKIE, SET_COOKIE};
    use chrono::{Duration, Utc};

    use super::*;
    use crate::session::{CookieAttributes, SameSite};

    fn record(value: &str) -> CookieRecord {
        CookieRecord::session(
            value.to_owned(),
            CookieAttributes {
                http_only: true,
                same_site: SameSite::Lax,
                path: "/".to_owned(),
                secure: true,
                expires: Utc::now() + Duration::days(7),
            },
        )
    }

    #[test]
    fn test_reads_request_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "theme=dark; auth-token=abc.def.ghi".parse().unwrap());

        let cookies = SessionCookies::from_headers(&headers);
        assert_eq!(cookies.get("auth-token"), Some("abc.def.ghi".to_owned()));
        assert_eq!(cookies.get("missing"), None);
    }

    #[test]
    fn test_set_emits_set_cookie() {
        let mut cookies = SessionCookies::default();
        cookies.set(record("abc.def.ghi")).unwrap();
        assert_eq!(cookies.get("auth-token"), Some("abc.def.ghi".to_owned()));

        let response = cookies.into_response();
        let header = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(header.starts_with("auth-token=abc.def.ghi"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Lax"));
        assert!(header.contains("Secure"));
    }

    #[test]
    fn test_delete_emits_removal() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "auth-token=abc.def.ghi".parse().unwrap());

        let mut cookies = SessionCookies::from_headers(&headers);
        cookies.delete("auth-token").unwrap();
        assert_eq!(cookies.get("auth-token"), None);

        let response = cookies.into_response();
        let header = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(header.starts_with("auth-token=;"));
        assert!(header.contains("Max-Age=0"));
    }

    #[test]
    fn test_delete_without_cookie_still_emits_removal() {
        let mut cookies = SessionCookies::default();
        cookies.delete("auth-token").unwrap();

        let response = cookies.into_response();
        assert!(response.headers().get(SET_COOKIE).is_some());
    }
}
