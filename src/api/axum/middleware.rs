use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use super::cookies::SessionCookies;
use super::error::AppError;
use crate::session::{AuthStatus, SessionClaims, SessionService};
use crate::AuthError;

/// Requires a valid session cookie.
///
/// Rejects with `401 {"error":"Authentication required"}` when the session is
/// missing, tampered with or expired.
#[derive(Debug, Clone)]
pub struct SessionUser(pub SessionClaims);

impl SessionUser {
    pub fn user_id(&self) -> &str {
        &self.0.user_id
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn claims(&self) -> &SessionClaims {
        &self.0
    }

    pub fn into_inner(self) -> SessionClaims {
        self.0
    }
}

fn session_from_parts(parts: &Parts, service: &SessionService) -> Option<SessionClaims> {
    if let Some(claims) = parts.extensions.get::<SessionClaims>() {
        return Some(claims.clone());
    }

    let cookies = SessionCookies::from_headers(&parts.headers);
    service.get_session(&cookies).into_claims()
}

impl<S> FromRequestParts<S> for SessionUser
where
    SessionService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let service = SessionService::from_ref(state);

        session_from_parts(parts, &service)
            .map(SessionUser)
            .ok_or(AppError(AuthError::Unauthenticated))
    }
}

/// Never rejects; yields [`AuthStatus::Unauthenticated`] instead.
impl<S> FromRequestParts<S> for AuthStatus
where
    SessionService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let service = SessionService::from_ref(state);

        Ok(match session_from_parts(parts, &service) {
            Some(claims) => AuthStatus::Authenticated {
                user_id: claims.user_id,
                email: claims.email,
            },
            None => AuthStatus::Unauthenticated,
        })
    }
}

/// Route guard for protected paths.
///
/// Verifies the session cookie straight from the request headers and stores
/// the [`SessionClaims`] in the request extensions for downstream handlers.
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/api/projects", get(list_projects))
///     .route_layer(axum::middleware::from_fn_with_state(service.clone(), require_session));
/// ```
pub async fn require_session(
    State(service): State<SessionService>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let cookies = SessionCookies::from_headers(request.headers());

    let claims = service
        .get_session(&cookies)
        .into_claims()
        .ok_or(AppError(AuthError::Unauthenticated))?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
