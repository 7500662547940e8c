//! HS256 session tokens.
//!
//! Tokens are compact JWS strings (`header.payload.signature`, base64url), so
//! they can be placed in a `Set-Cookie` header without escaping. The header
//! names the algorithm and anything other than HS256 is rejected before the
//! payload is trusted.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::SessionClaims;
use crate::{AuthError, SigningSecret};

/// The only algorithm accepted on the way in, and used on the way out.
pub const SESSION_ALGORITHM: Algorithm = Algorithm::HS256;

/// Wire payload. `exp` mirrors `expiresAt` at second precision so standard
/// JWT tooling can read the expiry too.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenClaims {
    user_id: String,
    email: String,
    expires_at: DateTime<Utc>,
    iat: i64,
    exp: i64,
}

/// Signs and verifies session tokens with a single symmetric secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenSigner {
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Signs `claims`, stamping `issued_at` as `iat`.
    ///
    /// # Errors
    /// Returns `AuthError::Internal` if the signing primitive fails.
    pub fn encode(
        &self,
        claims: &SessionClaims,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let payload = TokenClaims {
            user_id: claims.user_id.clone(),
            email: claims.email.clone(),
            expires_at: claims.expires_at,
            iat: issued_at.timestamp(),
            exp: claims.expires_at.timestamp(),
        };

        jsonwebtoken::encode(&Header::new(SESSION_ALGORITHM), &payload, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("failed to sign session token: {e}")))
    }

    /// Verifies signature, algorithm and expiry, then returns the claims.
    ///
    /// Expiry is checked against `now` rather than the system clock.
    ///
    /// # Errors
    /// `AuthError::TokenExpired` when `now >= expiresAt`, `AuthError::TokenInvalid`
    /// for every other failure.
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::new(SESSION_ALGORITHM);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        let token_data =
            jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(
                |e| {
                    log::debug!(target: "uigen_auth::session", "msg=\"token rejected\", kind=\"{:?}\"", e.kind());
                    AuthError::TokenInvalid
                },
            )?;

        let payload = token_data.claims;

        if payload.exp != payload.expires_at.timestamp() {
            return Err(AuthError::TokenInvalid);
        }

        if payload.user_id.is_empty() || payload.email.is_empty() {
            return Err(AuthError::TokenInvalid);
        }

        let claims = SessionClaims {
            user_id: payload.user_id,
            email: payload.email,
            expires_at: payload.expires_at,
        };

        if claims.is_expired_at(now) {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}
