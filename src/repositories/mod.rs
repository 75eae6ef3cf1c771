// src/repositories/mod.rs - Store trait shared by the Postgres and in-memory backends

pub mod comment_repository;
pub mod memory_store;
pub mod pg_store;
pub mod post_repository;
pub mod user_repository;

use async_trait::async_trait;
use thiserror::Error;
use tokio_postgres::error::SqlState;

use crate::models::comment::{Comment, NewComment};
use crate::models::post::{NewPost, Post};
use crate::models::user::{NewUser, User};

pub use memory_store::MemoryStore;
pub use pg_store::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),
    #[error("postgres error: {0}")]
    Postgres(tokio_postgres::Error),
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("foreign key violated: {0}")]
    ForeignKeyViolation(String),
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(e: tokio_postgres::Error) -> Self {
        match e.code() {
            Some(code) if *code == SqlState::UNIQUE_VIOLATION => {
                StoreError::UniqueViolation(e.to_string())
            }
            Some(code) if *code == SqlState::FOREIGN_KEY_VIOLATION => {
                StoreError::ForeignKeyViolation(e.to_string())
            }
            _ => StoreError::Postgres(e),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Relational persistence for users, posts and comments.
///
/// Each call is atomic on its own. `delete_post` is the only multi-statement
/// operation and removes the post's comments before the post itself.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn insert_post(&self, post: NewPost) -> StoreResult<Post>;
    async fn find_post(&self, id: i64) -> StoreResult<Option<Post>>;
    /// Overwrites title/content only. `None` when the post does not exist.
    async fn update_post(&self, id: i64, post: NewPost) -> StoreResult<Option<Post>>;
    /// Deletes the post and its comments. Returns the number of comments removed,
    /// or `None` when the post does not exist.
    async fn delete_post(&self, id: i64) -> StoreResult<Option<u64>>;
    /// Counts posts whose title or content contains `search` (case-insensitive).
    async fn count_posts(&self, search: Option<&str>) -> StoreResult<u64>;
    /// Newest first, ties by id descending.
    async fn list_posts(
        &self,
        search: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> StoreResult<Vec<Post>>;

    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment>;
    /// Oldest first, ties by id ascending.
    async fn comments_for_post(&self, post_id: i64) -> StoreResult<Vec<Comment>>;
}
