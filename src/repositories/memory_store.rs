// src/repositories/memory_store.rs - process-local Store for tests and STORE_BACKEND=memory

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::comment::{Comment, NewComment};
use crate::models::post::{NewPost, Post};
use crate::models::user::{NewUser, User};
use crate::repositories::{Store, StoreError, StoreResult};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    last_user_id: i64,
    last_post_id: i64,
    last_comment_id: i64,
    last_stamp: Option<DateTime<Utc>>,
}

impl Tables {
    /// Never hands out a timestamp older than the previous one.
    fn stamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_stamp {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

fn matches_search(post: &Post, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(n) => {
            post.title.to_lowercase().contains(n) || post.content.to_lowercase().contains(n)
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn comment_count(&self) -> usize {
        self.tables.read().await.comments.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let mut t = self.tables.write().await;
        if t.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::UniqueViolation(format!(
                "users.username = {}",
                user.username
            )));
        }
        t.last_user_id += 1;
        let row = User {
            id: t.last_user_id,
            username: user.username,
            password_hash: user.password_hash,
        };
        t.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.values().find(|u| u.username == username).cloned())
    }

    async fn insert_post(&self, post: NewPost) -> StoreResult<Post> {
        let mut t = self.tables.write().await;
        t.last_post_id += 1;
        let row = Post {
            id: t.last_post_id,
            title: post.title,
            content: post.content,
            date_posted: t.stamp(),
        };
        t.posts.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_post(&self, id: i64) -> StoreResult<Option<Post>> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn update_post(&self, id: i64, post: NewPost) -> StoreResult<Option<Post>> {
        let mut t = self.tables.write().await;
        Ok(t.posts.get_mut(&id).map(|row| {
            row.title = post.title;
            row.content = post.content;
            row.clone()
        }))
    }

    async fn delete_post(&self, id: i64) -> StoreResult<Option<u64>> {
        let mut t = self.tables.write().await;
        if t.posts.remove(&id).is_none() {
            return Ok(None);
        }
        let before = t.comments.len();
        t.comments.retain(|_, c| c.post_id != id);
        Ok(Some((before - t.comments.len()) as u64))
    }

    async fn count_posts(&self, search: Option<&str>) -> StoreResult<u64> {
        let needle = search.map(str::to_lowercase);
        let t = self.tables.read().await;
        Ok(t.posts
            .values()
            .filter(|p| matches_search(p, needle.as_deref()))
            .count() as u64)
    }

    async fn list_posts(
        &self,
        search: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> StoreResult<Vec<Post>> {
        let needle = search.map(str::to_lowercase);
        let t = self.tables.read().await;
        let mut selected: Vec<&Post> = t
            .posts
            .values()
            .filter(|p| matches_search(p, needle.as_deref()))
            .collect();
        selected.sort_by(|a, b| {
            b.date_posted
                .cmp(&a.date_posted)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(selected
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment> {
        let mut t = self.tables.write().await;
        if !t.posts.contains_key(&comment.post_id) {
            return Err(StoreError::ForeignKeyViolation(format!(
                "comments.post_id = {}",
                comment.post_id
            )));
        }
        t.last_comment_id += 1;
        let row = Comment {
            id: t.last_comment_id,
            post_id: comment.post_id,
            author: comment.author,
            content: comment.content,
            date_posted: t.stamp(),
        };
        t.comments.insert(row.id, row.clone());
        Ok(row)
    }

    async fn comments_for_post(&self, post_id: i64) -> StoreResult<Vec<Comment>> {
        let t = self.tables.read().await;
        let mut rows: Vec<Comment> = t
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.date_posted.cmp(&b.date_posted).then_with(|| a.id.cmp(&b.id)));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, content: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    fn comment(post_id: i64, content: &str) -> NewComment {
        NewComment {
            post_id,
            author: "Anonymous".to_string(),
            content: content.to_string(),
        }
    }

    #[actix_web::test]
    async fn lists_newest_first_and_filters_case_insensitively() {
        let store = MemoryStore::new();
        store.insert_post(post("Rust tips", "borrowing")).await.unwrap();
        store.insert_post(post("Cooking", "a RUSTic bread")).await.unwrap();
        store.insert_post(post("Travel", "trains")).await.unwrap();

        let all = store.list_posts(None, 10, 0).await.unwrap();
        let ids: Vec<i64> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        let hits = store.list_posts(Some("rust"), 10, 0).await.unwrap();
        let ids: Vec<i64> = hits.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(store.count_posts(Some("RUST")).await.unwrap(), 2);
    }

    #[actix_web::test]
    async fn offset_past_end_is_empty() {
        let store = MemoryStore::new();
        store.insert_post(post("a", "b")).await.unwrap();
        assert!(store.list_posts(None, 5, 5).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn delete_removes_only_that_posts_comments() {
        let store = MemoryStore::new();
        let keep = store.insert_post(post("keep", "x")).await.unwrap();
        let gone = store.insert_post(post("gone", "y")).await.unwrap();
        store.insert_comment(comment(keep.id, "1")).await.unwrap();
        store.insert_comment(comment(gone.id, "2")).await.unwrap();
        store.insert_comment(comment(gone.id, "3")).await.unwrap();

        assert_eq!(store.delete_post(gone.id).await.unwrap(), Some(2));
        assert_eq!(store.comment_count().await, 1);
        assert_eq!(store.delete_post(gone.id).await.unwrap(), None);
    }

    #[actix_web::test]
    async fn comment_needs_existing_post() {
        let store = MemoryStore::new();
        let err = store.insert_comment(comment(42, "hi")).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
    }

    #[actix_web::test]
    async fn duplicate_username_is_a_unique_violation() {
        let store = MemoryStore::new();
        let user = || NewUser {
            username: "alice".to_string(),
            password_hash: "h".to_string(),
        };
        store.insert_user(user()).await.unwrap();
        let err = store.insert_user(user()).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }

    #[actix_web::test]
    async fn timestamps_never_go_backwards() {
        let store = MemoryStore::new();
        let a = store.insert_post(post("a", "a")).await.unwrap();
        let b = store.insert_post(post("b", "b")).await.unwrap();
        assert!(b.date_posted >= a.date_posted);
    }
}
