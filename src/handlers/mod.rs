pub mod auth_handlers;
pub mod post_handlers;

use actix_web::http::header;
use actix_web::{HttpResponse, HttpResponseBuilder, web};
use serde::Serialize;

use crate::errors::AppError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::middleware::flash::{FlashMessage, IncomingFlashes, clear_flash_cookie, flash_cookie};

#[derive(Serialize)]
struct ApiResponse<T: Serialize> {
    status: String,
    message: String,
    data: Option<T>,
    flashes: Vec<FlashMessage>,
    current_user: Option<String>,
}

/// 200 with the view model. Pending flash messages are shown once and cleared.
pub(crate) fn render<T: Serialize>(
    message: &str,
    data: T,
    flashes: IncomingFlashes,
    user: Option<&AuthenticatedUser>,
) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    if !flashes.is_empty() {
        builder.cookie(clear_flash_cookie());
    }

    builder.json(ApiResponse {
        status: "success".to_string(),
        message: message.to_string(),
        data: Some(data),
        flashes: flashes.0,
        current_user: user.map(|u| u.username.clone()),
    })
}

/// 303 to `location`, leaving `flash` for the next page.
pub(crate) fn redirect(location: &str, flash: FlashMessage) -> HttpResponseBuilder {
    let mut builder = HttpResponse::SeeOther();
    builder
        .insert_header((header::LOCATION, location.to_string()))
        .cookie(flash_cookie(&[flash]));
    builder
}

/// Fallback for unmatched routes.
pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound("page"))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        // `/post/abc` is a missing page, not a bad request
        web::PathConfig::default().error_handler(|_, _| AppError::NotFound("page").into()),
    )
    .service(post_handlers::index)
    .service(post_handlers::view_post)
    .service(post_handlers::add_comment)
    .service(post_handlers::create_form)
    .service(post_handlers::create_post)
    .service(post_handlers::edit_form)
    .service(post_handlers::edit_post)
    .service(post_handlers::delete_post)
    .service(auth_handlers::signup_form)
    .service(auth_handlers::signup)
    .service(auth_handlers::login_form)
    .service(auth_handlers::login)
    .service(auth_handlers::logout);
}
