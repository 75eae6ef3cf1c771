// src/repositories/comment_repository.rs

use deadpool_postgres::Client;
use tokio_postgres::{Row, Transaction};

use crate::models::comment::{Comment, NewComment};
use crate::repositories::StoreResult;

pub struct CommentRepository;

fn comment_from_row(row: &Row) -> Result<Comment, tokio_postgres::Error> {
    Ok(Comment {
        id: row.try_get("id")?,
        post_id: row.try_get("post_id")?,
        author: row.try_get("author")?,
        content: row.try_get("content")?,
        date_posted: row.try_get("date_posted")?,
    })
}

impl CommentRepository {
    pub async fn create_comment(client: &Client, comment: &NewComment) -> StoreResult<Comment> {
        let stmt = client
            .prepare_cached(
                "INSERT INTO comments (post_id, author, content) VALUES ($1, $2, $3) \
                 RETURNING id, post_id, author, content, date_posted",
            )
            .await?;
        let row = client
            .query_one(&stmt, &[&comment.post_id, &comment.author, &comment.content])
            .await?;
        Ok(comment_from_row(&row)?)
    }

    pub async fn list_for_post(client: &Client, post_id: i64) -> StoreResult<Vec<Comment>> {
        let stmt = client
            .prepare_cached(
                "SELECT id, post_id, author, content, date_posted FROM comments \
                 WHERE post_id = $1 ORDER BY date_posted ASC, id ASC",
            )
            .await?;
        let rows = client.query(&stmt, &[&post_id]).await?;
        Ok(rows
            .iter()
            .map(comment_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    pub async fn delete_for_post(txn: &Transaction<'_>, post_id: i64) -> StoreResult<u64> {
        Ok(txn
            .execute("DELETE FROM comments WHERE post_id = $1", &[&post_id])
            .await?)
    }
}
