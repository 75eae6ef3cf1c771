// src/repositories/pg_store.rs - Store backed by a deadpool-postgres pool

use async_trait::async_trait;
use deadpool_postgres::Pool;
use log::info;

use crate::models::comment::{Comment, NewComment};
use crate::models::post::{NewPost, Post};
use crate::models::user::{NewUser, User};
use crate::repositories::comment_repository::CommentRepository;
use crate::repositories::post_repository::PostRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::{Store, StoreResult};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    username VARCHAR(50) NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS blog_posts (
    id BIGSERIAL PRIMARY KEY,
    title VARCHAR(100) NOT NULL,
    content TEXT NOT NULL,
    date_posted TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
);
CREATE INDEX IF NOT EXISTS idx_blog_posts_date_posted ON blog_posts (date_posted DESC, id DESC);

CREATE TABLE IF NOT EXISTS comments (
    id BIGSERIAL PRIMARY KEY,
    post_id BIGINT NOT NULL REFERENCES blog_posts (id),
    author VARCHAR(50) NOT NULL DEFAULT 'Anonymous',
    content TEXT NOT NULL,
    date_posted TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
);
CREATE INDEX IF NOT EXISTS idx_comments_post_id ON comments (post_id, date_posted, id);
"#;

/// Every operation checks a connection out of the pool; it goes back when the
/// `Object` drops at the end of the call.
#[derive(Clone)]
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Creates the tables when they are missing. There is no versioning.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        let client = self.pool.get().await?;
        client.batch_execute(SCHEMA).await?;
        info!("database schema ready");
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let client = self.pool.get().await?;
        UserRepository::create_user(&client, &user).await
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let client = self.pool.get().await?;
        UserRepository::find_by_username(&client, username).await
    }

    async fn insert_post(&self, post: NewPost) -> StoreResult<Post> {
        let client = self.pool.get().await?;
        PostRepository::create_post(&client, &post).await
    }

    async fn find_post(&self, id: i64) -> StoreResult<Option<Post>> {
        let client = self.pool.get().await?;
        PostRepository::find_by_id(&client, id).await
    }

    async fn update_post(&self, id: i64, post: NewPost) -> StoreResult<Option<Post>> {
        let client = self.pool.get().await?;
        PostRepository::update_post(&client, id, &post).await
    }

    async fn delete_post(&self, id: i64) -> StoreResult<Option<u64>> {
        let mut client = self.pool.get().await?;
        let txn = client.transaction().await?;

        if !PostRepository::lock_post(&txn, id).await? {
            // dropping the transaction rolls it back
            return Ok(None);
        }

        // comments.post_id has no ON DELETE CASCADE
        let removed = CommentRepository::delete_for_post(&txn, id).await?;
        PostRepository::delete_post(&txn, id).await?;

        txn.commit().await?;
        Ok(Some(removed))
    }

    async fn count_posts(&self, search: Option<&str>) -> StoreResult<u64> {
        let client = self.pool.get().await?;
        PostRepository::count_posts(&client, search).await
    }

    async fn list_posts(
        &self,
        search: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> StoreResult<Vec<Post>> {
        let client = self.pool.get().await?;
        PostRepository::list_posts(&client, search, limit, offset).await
    }

    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment> {
        let client = self.pool.get().await?;
        CommentRepository::create_comment(&client, &comment).await
    }

    async fn comments_for_post(&self, post_id: i64) -> StoreResult<Vec<Comment>> {
        let client = self.pool.get().await?;
        CommentRepository::list_for_post(&client, post_id).await
    }
}
