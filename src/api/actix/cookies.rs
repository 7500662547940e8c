use std::future::{Ready, ready};

use actix_web::cookie::time::{Duration as CookieDuration, OffsetDateTime};
use actix_web::cookie::{Cookie, SameSite as ActixSameSite};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponseBuilder};

use crate::AuthError;
use crate::config::SESSION_COOKIE_PATH;
use crate::session::{CookieRecord, CookieTransport, SameSite};

/// Cookie transport for actix-web.
///
/// Reads come from the incoming request; writes are buffered and applied to
/// the response with [`ActixCookies::apply`].
#[derive(Debug, Clone)]
pub struct ActixCookies {
    request: HttpRequest,
    pending: Vec<Cookie<'static>>,
}

impl ActixCookies {
    pub fn new(request: &HttpRequest) -> Self {
        Self {
            request: request.clone(),
            pending: Vec::new(),
        }
    }

    /// Adds every buffered `Set-Cookie` to `builder`.
    pub fn apply(self, builder: &mut HttpResponseBuilder) {
        for cookie in self.pending {
            builder.cookie(cookie);
        }
    }
}

fn build_session_cookie(record: CookieRecord) -> Cookie<'static> {
    let same_site = match record.attributes.same_site {
        SameSite::None => ActixSameSite::None,
        SameSite::Lax => ActixSameSite::Lax,
        SameSite::Strict => ActixSameSite::Strict,
    };

    let mut cookie = Cookie::build(record.name, record.value)
        .path(record.attributes.path)
        .secure(record.attributes.secure)
        .http_only(record.attributes.http_only)
        .same_site(same_site)
        .finish();

    if let Ok(expires) = OffsetDateTime::from_unix_timestamp(record.attributes.expires.timestamp()) {
        cookie.set_expires(expires);
    }

    cookie
}

fn build_removal_cookie(name: &str) -> Cookie<'static> {
    Cookie::build(name.to_owned(), String::new())
        .path(SESSION_COOKIE_PATH)
        .max_age(CookieDuration::ZERO)
        .finish()
}

impl CookieTransport for ActixCookies {
    fn get(&self, name: &str) -> Option<String> {
        if let Some(cookie) = self.pending.iter().rev().find(|c| c.name() == name) {
            return Some(cookie.value().to_owned()).filter(|value| !value.is_empty());
        }

        self.request.cookie(name).map(|c| c.value().to_owned())
    }

    fn set(&mut self, record: CookieRecord) -> Result<(), AuthError> {
        self.pending.push(build_session_cookie(record));
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<(), AuthError> {
        self.pending.push(build_removal_cookie(name));
        Ok(())
    }
}

impl FromRequest for ActixCookies {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::new(req)))
    }
}
