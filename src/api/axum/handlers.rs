use axum::Json;
use axum::extract::State;

use super::cookies::SessionCookies;
use super::error::AppError;
use crate::api::MessageResponse;
use crate::session::{AuthStatus, SessionService};

pub async fn session_status(status: AuthStatus) -> Json<AuthStatus> {
    Json(status)
}

pub async fn session_logout(
    State(service): State<SessionService>,
    mut cookies: SessionCookies,
) -> Result<(SessionCookies, Json<MessageResponse>), AppError> {
    service.delete_session(&mut cookies)?;

    Ok((
        cookies,
        Json(MessageResponse {
            message: "Successfully logged out".to_owned(),
        }),
    ))
}
