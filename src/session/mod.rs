mod cookie;
mod memory_jar;
mod service;
mod token;

use chrono::{DateTime, Utc};
pub use cookie::{CookieAttributes, CookieRecord, CookieTransport, SameSite};
#[cfg(feature = "axum_support")]
pub(crate) use cookie::removal_cookie;
pub use memory_jar::InMemoryCookieJar;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
pub use service::SessionService;
pub use token::{SESSION_ALGORITHM, TokenSigner};

/// Identity and expiry recovered from a verified session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub user_id: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
    /// A session is invalid at and after `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Outcome of reading the session cookie.
///
/// Missing, tampered, malformed and expired cookies all collapse into
/// `Absent`; callers cannot tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Valid(SessionClaims),
    Absent,
}

impl SessionState {
    pub fn is_valid(&self) -> bool {
        matches!(self, SessionState::Valid(_))
    }

    pub fn claims(&self) -> Option<&SessionClaims> {
        match self {
            SessionState::Valid(claims) => Some(claims),
            SessionState::Absent => None,
        }
    }

    pub fn into_claims(self) -> Option<SessionClaims> {
        match self {
            SessionState::Valid(claims) => Some(claims),
            SessionState::Absent => None,
        }
    }
}

impl From<Option<SessionClaims>> for SessionState {
    fn from(claims: Option<SessionClaims>) -> Self {
        claims.map_or(SessionState::Absent, SessionState::Valid)
    }
}

/// Flattened yes/no gate plus identity.
///
/// Serializes as `{"isAuth":true,"userId":..,"email":..}` or `{"isAuth":false}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    Authenticated { user_id: String, email: String },
    Unauthenticated,
}

impl AuthStatus {
    pub fn is_auth(&self) -> bool {
        matches!(self, AuthStatus::Authenticated { .. })
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            AuthStatus::Authenticated { user_id, .. } => Some(user_id),
            AuthStatus::Unauthenticated => None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            AuthStatus::Authenticated { email, .. } => Some(email),
            AuthStatus::Unauthenticated => None,
        }
    }
}

impl From<SessionState> for AuthStatus {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::Valid(claims) => AuthStatus::Authenticated {
                user_id: claims.user_id,
                email: claims.email,
            },
            SessionState::Absent => AuthStatus::Unauthenticated,
        }
    }
}

impl Serialize for AuthStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            AuthStatus::Authenticated { user_id, email } => {
                let mut state = serializer.serialize_struct("AuthStatus", 3)?;
                state.serialize_field("isAuth", &true)?;
                state.serialize_field("userId", user_id)?;
                state.serialize_field("email", email)?;
                state.end()
            }
            AuthStatus::Unauthenticated => {
                let mut state = serializer.serialize_struct("AuthStatus", 1)?;
                state.serialize_field("isAuth", &false)?;
                state.end()
            }
        }
    }
}
