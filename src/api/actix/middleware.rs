use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};

use super::cookies::ActixCookies;
use crate::AuthError;
use crate::api::ErrorResponse;
use crate::session::{SessionClaims, SessionService};

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError {
    pub error: AuthError,
}

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse::from(self.error.clone());

        match &self.error {
            AuthError::Unauthenticated | AuthError::TokenExpired | AuthError::TokenInvalid => {
                HttpResponse::Unauthorized().json(error_response)
            }
            AuthError::Validation(_) => HttpResponse::BadRequest().json(error_response),
            _ => HttpResponse::InternalServerError().json(error_response),
        }
    }
}

impl From<AuthError> for AuthenticationError {
    fn from(error: AuthError) -> Self {
        Self { error }
    }
}

/// Session-authenticated user extractor.
///
/// Needs `web::Data<SessionService>` registered on the app.
#[derive(Debug, Clone)]
pub struct SessionUser(pub SessionClaims);

impl SessionUser {
    pub fn user_id(&self) -> &str {
        &self.0.user_id
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn into_inner(self) -> SessionClaims {
        self.0
    }
}

impl FromRequest for SessionUser {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(service) = req.app_data::<web::Data<SessionService>>() else {
            return ready(Err(AuthenticationError {
                error: AuthError::ConfigurationError("SessionService not found".to_owned()),
            }));
        };

        let cookies = ActixCookies::new(req);

        ready(
            service
                .get_session(&cookies)
                .into_claims()
                .map(SessionUser)
                .ok_or(AuthenticationError {
                    error: AuthError::Unauthenticated,
                }),
        )
    }
}
