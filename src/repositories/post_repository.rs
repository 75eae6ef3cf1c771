// src/repositories/post_repository.rs - blog_posts queries, search uses ILIKE

use deadpool_postgres::Client;
use tokio_postgres::{Row, Transaction};

use crate::models::post::{NewPost, Post};
use crate::repositories::StoreResult;

pub struct PostRepository;

/// Row lock taken before a cascade delete; blocks comment inserts (their FK check
/// takes KEY SHARE on the post) until the transaction ends.
pub const LOCK_POST_SQL: &str = "SELECT id FROM blog_posts WHERE id = $1 FOR UPDATE";

fn post_from_row(row: &Row) -> Result<Post, tokio_postgres::Error> {
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        date_posted: row.try_get("date_posted")?,
    })
}

/// Escapes LIKE wildcards so the search term matches literally, then wraps it in `%`.
pub fn like_pattern(search: &str) -> String {
    let mut out = String::with_capacity(search.len() + 2);
    out.push('%');
    for ch in search.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

impl PostRepository {
    pub async fn create_post(client: &Client, post: &NewPost) -> StoreResult<Post> {
        let stmt = client
            .prepare_cached(
                "INSERT INTO blog_posts (title, content) VALUES ($1, $2) \
                 RETURNING id, title, content, date_posted",
            )
            .await?;
        let row = client.query_one(&stmt, &[&post.title, &post.content]).await?;
        Ok(post_from_row(&row)?)
    }

    pub async fn find_by_id(client: &Client, id: i64) -> StoreResult<Option<Post>> {
        let stmt = client
            .prepare_cached("SELECT id, title, content, date_posted FROM blog_posts WHERE id = $1")
            .await?;
        let row = client.query_opt(&stmt, &[&id]).await?;
        Ok(row.as_ref().map(post_from_row).transpose()?)
    }

    pub async fn update_post(client: &Client, id: i64, post: &NewPost) -> StoreResult<Option<Post>> {
        let stmt = client
            .prepare_cached(
                "UPDATE blog_posts SET title = $2, content = $3 WHERE id = $1 \
                 RETURNING id, title, content, date_posted",
            )
            .await?;
        let row = client
            .query_opt(&stmt, &[&id, &post.title, &post.content])
            .await?;
        Ok(row.as_ref().map(post_from_row).transpose()?)
    }

    pub async fn lock_post(txn: &Transaction<'_>, id: i64) -> StoreResult<bool> {
        let row = txn.query_opt(LOCK_POST_SQL, &[&id]).await?;
        Ok(row.is_some())
    }

    pub async fn delete_post(txn: &Transaction<'_>, id: i64) -> StoreResult<bool> {
        let n = txn
            .execute("DELETE FROM blog_posts WHERE id = $1", &[&id])
            .await?;
        Ok(n > 0)
    }

    pub async fn count_posts(client: &Client, search: Option<&str>) -> StoreResult<u64> {
        let pattern = search.map(like_pattern);
        let stmt = client
            .prepare_cached(
                "SELECT COUNT(*) AS total FROM blog_posts \
                 WHERE $1::TEXT IS NULL OR title ILIKE $1 OR content ILIKE $1",
            )
            .await?;
        let row = client.query_one(&stmt, &[&pattern]).await?;
        let total: i64 = row.try_get("total")?;
        Ok(total.max(0) as u64)
    }

    pub async fn list_posts(
        client: &Client,
        search: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> StoreResult<Vec<Post>> {
        let pattern = search.map(like_pattern);
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let stmt = client
            .prepare_cached(
                "SELECT id, title, content, date_posted FROM blog_posts \
                 WHERE $1::TEXT IS NULL OR title ILIKE $1 OR content ILIKE $1 \
                 ORDER BY date_posted DESC, id DESC \
                 LIMIT $2 OFFSET $3",
            )
            .await?;
        let rows = client.query(&stmt, &[&pattern, &limit, &offset]).await?;
        Ok(rows.iter().map(post_from_row).collect::<Result<Vec<_>, _>>()?)
    }
}
