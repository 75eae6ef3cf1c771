// src/services/post_services.rs - post and comment CRUD

use std::sync::Arc;

use log::{debug, info};

use crate::errors::{AppError, AppResult};
use crate::models::comment::{Comment, NewComment};
use crate::models::post::{NewPost, Post};
use crate::repositories::{Store, StoreError};

#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn Store>,
}

impl PostService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create_post(&self, title: &str, content: &str) -> AppResult<Post> {
        let new_post = NewPost::validated(title, content).map_err(AppError::Validation)?;
        let post = self.store.insert_post(new_post).await?;
        debug!("created post {}", post.id);
        Ok(post)
    }

    pub async fn get_post(&self, id: i64) -> AppResult<Post> {
        self.store
            .find_post(id)
            .await?
            .ok_or(AppError::NotFound("post"))
    }

    /// Replaces title and content; `date_posted` is left untouched.
    pub async fn edit_post(&self, id: i64, title: &str, content: &str) -> AppResult<Post> {
        self.get_post(id).await?;
        let changes = NewPost::validated(title, content).map_err(AppError::Validation)?;
        let post = self
            .store
            .update_post(id, changes)
            .await?
            .ok_or(AppError::NotFound("post"))?;
        debug!("updated post {}", id);
        Ok(post)
    }

    /// Deletes the post together with its comments. Returns how many comments went with it.
    pub async fn delete_post(&self, id: i64) -> AppResult<u64> {
        let removed = self
            .store
            .delete_post(id)
            .await?
            .ok_or(AppError::NotFound("post"))?;
        debug!("deleted post {} and {} comment(s)", id, removed);
        Ok(removed)
    }

    pub async fn add_comment(
        &self,
        post_id: i64,
        author: Option<&str>,
        content: &str,
    ) -> AppResult<Comment> {
        // a missing post is reported before any field problem
        self.get_post(post_id).await?;
        let new_comment =
            NewComment::validated(post_id, author, content).map_err(AppError::Validation)?;

        match self.store.insert_comment(new_comment).await {
            Ok(comment) => {
                info!("comment {} added to post {}", comment.id, post_id);
                Ok(comment)
            }
            // post deleted between the check and the insert
            Err(StoreError::ForeignKeyViolation(_)) => Err(AppError::NotFound("post")),
            Err(e) => Err(e.into()),
        }
    }

    /// Oldest first. A post with no comments, or no post at all, gives an empty list.
    pub async fn list_comments(&self, post_id: i64) -> AppResult<Vec<Comment>> {
        Ok(self.store.comments_for_post(post_id).await?)
    }

    pub async fn post_with_comments(&self, id: i64) -> AppResult<(Post, Vec<Comment>)> {
        let post = self.get_post(id).await?;
        let comments = self.list_comments(id).await?;
        Ok((post, comments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;

    fn service() -> PostService {
        PostService::new(Arc::new(MemoryStore::new()))
    }

    #[actix_web::test]
    async fn create_then_get_round_trips() {
        let svc = service();
        let created = svc.create_post("Hello", "World").await.unwrap();
        assert_eq!(created.id, 1);

        let fetched = svc.get_post(created.id).await.unwrap();
        assert_eq!(fetched.title, "Hello");
        assert_eq!(fetched.content, "World");
    }

    #[actix_web::test]
    async fn create_rejects_blank_fields() {
        let svc = service();
        assert!(matches!(
            svc.create_post("", "body").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            svc.create_post("title", "").await,
            Err(AppError::Validation(_))
        ));
    }

    #[actix_web::test]
    async fn edit_keeps_date_posted() {
        let svc = service();
        let created = svc.create_post("Draft", "v1").await.unwrap();
        let edited = svc.edit_post(created.id, "Final", "v2").await.unwrap();

        assert_eq!(edited.title, "Final");
        assert_eq!(edited.content, "v2");
        assert_eq!(edited.date_posted, created.date_posted);
        assert_eq!(edited.id, created.id);
    }

    #[actix_web::test]
    async fn edit_missing_post_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.edit_post(9, "t", "c").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn delete_cascades_to_comments() {
        let svc = service();
        let post = svc.create_post("Hello", "World").await.unwrap();
        svc.add_comment(post.id, Some("ann"), "first").await.unwrap();
        svc.add_comment(post.id, None, "second").await.unwrap();

        assert_eq!(svc.delete_post(post.id).await.unwrap(), 2);
        assert!(matches!(svc.get_post(post.id).await, Err(AppError::NotFound(_))));
        assert!(svc.list_comments(post.id).await.unwrap().is_empty());
        assert!(matches!(svc.delete_post(post.id).await, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn comments_come_back_oldest_first() {
        let svc = service();
        let post = svc.create_post("Hello", "World").await.unwrap();
        for body in ["one", "two", "three"] {
            svc.add_comment(post.id, None, body).await.unwrap();
        }

        let comments = svc.list_comments(post.id).await.unwrap();
        let bodies: Vec<&str> = comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(bodies, vec!["one", "two", "three"]);
        assert!(comments.iter().all(|c| c.author == "Anonymous"));
    }

    #[actix_web::test]
    async fn comment_errors() {
        let svc = service();
        assert!(matches!(
            svc.add_comment(5, None, "hi").await,
            Err(AppError::NotFound(_))
        ));

        let post = svc.create_post("Hello", "World").await.unwrap();
        assert!(matches!(
            svc.add_comment(post.id, Some("bob"), "  ").await,
            Err(AppError::Validation(_))
        ));
    }
}
