use serde::Serialize;

use crate::AuthError;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let code = match &err {
            AuthError::Unauthenticated | AuthError::TokenExpired | AuthError::TokenInvalid => {
                "UNAUTHENTICATED"
            }
            AuthError::Validation(_) => "VALIDATION_ERROR",
            AuthError::ConfigurationError(_) => "CONFIGURATION_ERROR",
            AuthError::Transport(_) | AuthError::Internal(_) => "INTERNAL_ERROR",
        };

        // token failures must read exactly like a missing session
        let error = match &err {
            AuthError::TokenExpired | AuthError::TokenInvalid => {
                AuthError::Unauthenticated.to_string()
            }
            AuthError::ConfigurationError(_) | AuthError::Transport(_) | AuthError::Internal(_) => {
                "Internal server error".to_owned()
            }
            _ => err.to_string(),
        };

        ErrorResponse {
            error,
            code: code.to_owned(),
        }
    }
}
