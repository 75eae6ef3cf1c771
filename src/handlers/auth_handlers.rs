use actix_web::{HttpResponse, get, post, web};

use crate::AppState;
use crate::dtos::auth::{LoginIn, SignupIn};
use crate::dtos::post_dtos::FormView;
use crate::errors::{AppError, AppResult};
use crate::handlers::{redirect, render};
use crate::middleware::auth_extractor::{AuthenticatedUser, SessionKeys};
use crate::middleware::flash::{FlashMessage, IncomingFlashes};

fn credentials_form(action: &str) -> FormView {
    FormView {
        action: action.to_string(),
        fields: vec!["username", "password"],
        post: None,
    }
}

/// GET /signup
#[get("/signup")]
pub async fn signup_form(
    user: Option<AuthenticatedUser>,
    flashes: IncomingFlashes,
) -> HttpResponse {
    render("Create an account", credentials_form("/signup"), flashes, user.as_ref())
}

/// POST /signup
/// Creates the account only; the client logs in afterwards.
#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    form: web::Form<SignupIn>,
) -> AppResult<HttpResponse> {
    match state.auth.signup(form.into_inner()).await {
        Ok(_) => Ok(redirect(
            "/login",
            FlashMessage::success("Account created! Please log in."),
        )
        .finish()),
        Err(AppError::DuplicateUsername) => Ok(redirect(
            "/signup",
            FlashMessage::danger("Username already exists. Please choose another one."),
        )
        .finish()),
        Err(AppError::Validation(msg)) => {
            Ok(redirect("/signup", FlashMessage::danger(msg)).finish())
        }
        Err(e) => Err(e),
    }
}

/// GET /login
#[get("/login")]
pub async fn login_form(
    user: Option<AuthenticatedUser>,
    flashes: IncomingFlashes,
) -> HttpResponse {
    render("Log in", credentials_form("/login"), flashes, user.as_ref())
}

/// POST /login
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    sessions: web::Data<SessionKeys>,
    form: web::Form<LoginIn>,
) -> AppResult<HttpResponse> {
    match state.auth.login(form.into_inner()).await {
        Ok(session_user) => {
            let cookie = sessions.issue(&session_user)?;
            Ok(redirect("/", FlashMessage::success("Logged in successfully."))
                .cookie(cookie)
                .finish())
        }
        Err(AppError::InvalidCredentials) => Ok(redirect(
            "/login",
            FlashMessage::danger("Invalid username or password."),
        )
        .finish()),
        Err(e) => Err(e),
    }
}

/// GET /logout - always succeeds, with or without a session
#[get("/logout")]
pub async fn logout(sessions: web::Data<SessionKeys>) -> HttpResponse {
    redirect("/", FlashMessage::info("You have been logged out."))
        .cookie(sessions.clear())
        .finish()
}
