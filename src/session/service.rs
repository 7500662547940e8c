use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};

use super::cookie::{CookieAttributes, CookieRecord, CookieTransport};
use super::token::TokenSigner;
use super::{AuthStatus, SessionClaims, SessionState};
use crate::config::{SESSION_COOKIE_NAME, SessionConfig, session_lifetime};
use crate::AuthError;

/// Issues, reads and ends cookie sessions.
///
/// Cheap to clone; every clone shares the same immutable configuration and
/// signing keys, so one instance can serve all concurrent requests.
#[derive(Clone)]
pub struct SessionService {
    inner: Arc<Inner>,
}

struct Inner {
    config: SessionConfig,
    signer: TokenSigner,
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl SessionService {
    pub fn new(config: SessionConfig) -> Self {
        let signer = TokenSigner::new(config.secret());
        Self {
            inner: Arc::new(Inner { config, signer }),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Starts a session for an identity that has already been verified.
    ///
    /// The token and the cookie both expire seven days from now.
    ///
    /// # Errors
    /// - `AuthError::Validation` if `user_id` or `email` is empty
    /// - `AuthError::Internal` if signing fails; no cookie is written
    /// - `AuthError::Transport` if the cookie cannot be written
    pub fn create_session<T>(
        &self,
        transport: &mut T,
        user_id: &str,
        email: &str,
    ) -> Result<(), AuthError>
    where
        T: CookieTransport + ?Sized,
    {
        self.create_session_at(transport, user_id, email, Utc::now())
    }

    /// [`create_session`](Self::create_session) with an explicit clock.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_session", skip_all, err)
    )]
    pub fn create_session_at<T>(
        &self,
        transport: &mut T,
        user_id: &str,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError>
    where
        T: CookieTransport + ?Sized,
    {
        if user_id.is_empty() {
            return Err(AuthError::Validation("user id must not be empty".to_owned()));
        }
        if email.is_empty() {
            return Err(AuthError::Validation("email must not be empty".to_owned()));
        }

        // cookie `Expires` has second resolution; keep the claim on the same instant
        let now = now.trunc_subsecs(0);
        let expires_at = now + session_lifetime();
        let claims = SessionClaims {
            user_id: user_id.to_owned(),
            email: email.to_owned(),
            expires_at,
        };

        let token = self.inner.signer.encode(&claims, now)?;
        let attributes = CookieAttributes::for_session(&self.inner.config, expires_at);

        transport.set(CookieRecord::session(token, attributes))?;

        log::info!(
            target: "uigen_auth::session",
            "msg=\"session created\", user_id=\"{user_id}\", expires_at=\"{}\"",
            expires_at.to_rfc3339()
        );

        Ok(())
    }

    /// Reads and verifies the session cookie of the current request.
    ///
    /// Never fails: a missing, tampered, malformed or expired cookie is
    /// [`SessionState::Absent`].
    pub fn get_session<T>(&self, transport: &T) -> SessionState
    where
        T: CookieTransport + ?Sized,
    {
        self.get_session_at(transport, Utc::now())
    }

    /// [`get_session`](Self::get_session) with an explicit clock.
    #[cfg_attr(feature = "tracing", tracing::instrument(name = "get_session", skip_all))]
    pub fn get_session_at<T>(&self, transport: &T, now: DateTime<Utc>) -> SessionState
    where
        T: CookieTransport + ?Sized,
    {
        match transport.get(SESSION_COOKIE_NAME) {
            Some(token) => self.verify_token(&token, now),
            None => SessionState::Absent,
        }
    }

    /// Verifies a raw token value, e.g. one taken straight from request headers.
    pub fn verify_token(&self, token: &str, now: DateTime<Utc>) -> SessionState {
        match self.inner.signer.decode(token, now) {
            Ok(claims) => SessionState::Valid(claims),
            Err(AuthError::TokenExpired) => {
                log::debug!(target: "uigen_auth::session", "msg=\"session expired\"");
                SessionState::Absent
            }
            Err(_) => {
                log::warn!(target: "uigen_auth::session", "msg=\"session cookie verification failed\"");
                SessionState::Absent
            }
        }
    }

    /// Yes/no gate plus identity for the current request.
    pub fn verify_session<T>(&self, transport: &T) -> AuthStatus
    where
        T: CookieTransport + ?Sized,
    {
        self.verify_session_at(transport, Utc::now())
    }

    /// [`verify_session`](Self::verify_session) with an explicit clock.
    pub fn verify_session_at<T>(&self, transport: &T, now: DateTime<Utc>) -> AuthStatus
    where
        T: CookieTransport + ?Sized,
    {
        self.get_session_at(transport, now).into()
    }

    /// Ends the session by removing the cookie. Safe to call without a session.
    ///
    /// # Errors
    /// Returns `AuthError::Transport` if the removal cannot be applied.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "delete_session", skip_all, err)
    )]
    pub fn delete_session<T>(&self, transport: &mut T) -> Result<(), AuthError>
    where
        T: CookieTransport + ?Sized,
    {
        transport.delete(SESSION_COOKIE_NAME)?;

        log::info!(target: "uigen_auth::session", "msg=\"session deleted\"");

        Ok(())
    }
}
