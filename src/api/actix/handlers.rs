use actix_web::{HttpResponse, web};

use super::cookies::ActixCookies;
use super::middleware::AuthenticationError;
use crate::api::MessageResponse;
use crate::session::SessionService;

pub async fn session_status(
    service: web::Data<SessionService>,
    cookies: ActixCookies,
) -> HttpResponse {
    HttpResponse::Ok().json(service.verify_session(&cookies))
}

pub async fn session_logout(
    service: web::Data<SessionService>,
    mut cookies: ActixCookies,
) -> Result<HttpResponse, AuthenticationError> {
    service.delete_session(&mut cookies)?;

    let mut builder = HttpResponse::Ok();
    cookies.apply(&mut builder);

    Ok(builder.json(MessageResponse {
        message: "Successfully logged out".to_owned(),
    }))
}
