// src/errors.rs - request-boundary error taxonomy

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde_json::json;
use thiserror::Error;

use crate::middleware::flash::{FlashMessage, flash_cookie};
use crate::repositories::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error("username already exists")]
    DuplicateUsername,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("login required")]
    LoginRequired,
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::DuplicateUsername => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::LoginRequired => StatusCode::SEE_OTHER,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::LoginRequired => HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/login"))
                .cookie(flash_cookie(&[FlashMessage::info(
                    "Please log in to access this page.",
                )]))
                .finish(),
            AppError::Store(_) | AppError::Internal(_) => {
                error!("request failed: {}", self);
                HttpResponse::InternalServerError().json(json!({
                    "status": "error",
                    "message": "Something went wrong. Please try again.",
                    "data": null,
                    "flashes": [],
                }))
            }
            other => HttpResponse::build(other.status_code()).json(json!({
                "status": "error",
                "message": other.to_string(),
                "data": null,
                "flashes": [],
            })),
        }
    }
}
