// src/handlers/post_handlers.rs - listing, post view, comments and post CRUD routes

use actix_web::{HttpResponse, get, post, route, web};
use log::info;

use crate::AppState;
use crate::dtos::comment_dtos::{CommentForm, PostDetailOut};
use crate::dtos::listing_dtos::{IndexOut, ListQuery};
use crate::dtos::post_dtos::{FormView, PostForm};
use crate::errors::{AppError, AppResult};
use crate::handlers::{redirect, render};
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::middleware::flash::{FlashMessage, IncomingFlashes};

/// GET/POST / - paginated, searchable listing (`q`, `page`)
#[route("/", method = "GET", method = "POST")]
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
    user: Option<AuthenticatedUser>,
    flashes: IncomingFlashes,
) -> AppResult<HttpResponse> {
    let page = state
        .listing
        .list_posts(query.q.as_deref(), query.page_number())
        .await?;

    Ok(render(
        "Posts retrieved successfully",
        IndexOut::from(page),
        flashes,
        user.as_ref(),
    ))
}

/// GET /post/{id} - the post and its comments, oldest comment first
#[get("/post/{id}")]
pub async fn view_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    user: Option<AuthenticatedUser>,
    flashes: IncomingFlashes,
) -> AppResult<HttpResponse> {
    let (post, comments) = state.posts.post_with_comments(path.into_inner()).await?;

    Ok(render(
        "Post retrieved successfully",
        PostDetailOut { post, comments },
        flashes,
        user.as_ref(),
    ))
}

/// POST /post/{id} - add a comment (`author` optional, `content`)
#[post("/post/{id}")]
pub async fn add_comment(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let back = format!("/post/{}", post_id);

    match state
        .posts
        .add_comment(post_id, form.author.as_deref(), &form.content)
        .await
    {
        Ok(_) => Ok(redirect(&back, FlashMessage::success("Comment added!")).finish()),
        Err(AppError::Validation(msg)) => Ok(redirect(&back, FlashMessage::danger(msg)).finish()),
        Err(e) => Err(e),
    }
}

/// GET /create - form page
#[get("/create")]
pub async fn create_form(user: AuthenticatedUser, flashes: IncomingFlashes) -> HttpResponse {
    let view = FormView {
        action: "/create".to_string(),
        fields: vec!["title", "content"],
        post: None,
    };
    render("Create a post", view, flashes, Some(&user))
}

/// POST /create
#[post("/create")]
pub async fn create_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    match state.posts.create_post(&form.title, &form.content).await {
        Ok(post) => {
            info!("user {} created post {}", user.user_id, post.id);
            Ok(redirect("/", FlashMessage::success("Post created successfully!")).finish())
        }
        Err(AppError::Validation(msg)) => {
            Ok(redirect("/create", FlashMessage::danger(msg)).finish())
        }
        Err(e) => Err(e),
    }
}

/// GET /edit/{id} - form page prefilled with the post
#[get("/edit/{id}")]
pub async fn edit_form(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    user: AuthenticatedUser,
    flashes: IncomingFlashes,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post(path.into_inner()).await?;
    let view = FormView {
        action: format!("/edit/{}", post.id),
        fields: vec!["title", "content"],
        post: Some(post),
    };
    Ok(render("Edit the post", view, flashes, Some(&user)))
}

/// POST /edit/{id}
#[post("/edit/{id}")]
pub async fn edit_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    user: AuthenticatedUser,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    match state.posts.edit_post(id, &form.title, &form.content).await {
        Ok(post) => {
            info!("user {} edited post {}", user.user_id, post.id);
            Ok(redirect(
                &format!("/post/{}", post.id),
                FlashMessage::success("Post updated successfully!"),
            )
            .finish())
        }
        Err(AppError::Validation(msg)) => {
            Ok(redirect(&format!("/edit/{}", id), FlashMessage::danger(msg)).finish())
        }
        Err(e) => Err(e),
    }
}

/// GET/POST /delete/{id} - removes the post and its comments.
/// GET is kept so existing "delete" links keep working.
#[route("/delete/{id}", method = "GET", method = "POST")]
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    user: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let removed = state.posts.delete_post(id).await?;
    info!(
        "user {} deleted post {} and {} comment(s)",
        user.user_id, id, removed
    );
    Ok(redirect("/", FlashMessage::info("Post deleted successfully!")).finish())
}
