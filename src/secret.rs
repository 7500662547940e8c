//! The HMAC signing secret.
//!
//! The secret is process-wide configuration: it is validated once when the
//! process starts and then only read. It never appears in `Debug` or
//! `Display` output and deliberately does not implement `Serialize`.

use std::fmt;

use crate::AuthError;

/// Minimum accepted secret length in bytes (the HS256 block of entropy).
pub const MIN_SECRET_LENGTH: usize = 32;

/// Symmetric key used to sign and verify session tokens.
///
/// # Example
///
/// ```rust
/// use uigen_auth::SigningSecret;
///
/// let secret = SigningSecret::new("a-signing-secret-of-at-least-32-bytes").unwrap();
/// assert_eq!(format!("{secret:?}"), "SigningSecret([REDACTED])");
///
/// assert!(SigningSecret::new("too-short").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(String);

impl SigningSecret {
    /// Wraps `secret`, rejecting values shorter than [`MIN_SECRET_LENGTH`] bytes.
    ///
    /// # Errors
    /// Returns `AuthError::ConfigurationError` for empty or short secrets.
    pub fn new(secret: impl Into<String>) -> Result<Self, AuthError> {
        let secret = secret.into();

        if secret.is_empty() {
            return Err(AuthError::ConfigurationError(
                "signing secret must not be empty".to_owned(),
            ));
        }

        if secret.len() < MIN_SECRET_LENGTH {
            return Err(AuthError::ConfigurationError(format!(
                "signing secret must be at least {MIN_SECRET_LENGTH} bytes, got {}",
                secret.len()
            )));
        }

        Ok(Self(secret))
    }

    /// Raw key bytes for the MAC primitive.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret([REDACTED])")
    }
}

impl fmt::Display for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl TryFrom<String> for SigningSecret {
    type Error = AuthError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for SigningSecret {
    type Error = AuthError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}
