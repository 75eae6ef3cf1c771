use chrono::{DateTime, Utc};
use serde::Serialize;

pub const TITLE_MAX_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub date_posted: DateTime<Utc>,
}

/// Title and content of a post, already validated. Used for both create and edit.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

impl NewPost {
    pub fn validated(title: &str, content: &str) -> Result<Self, String> {
        let title = title.trim();
        if title.is_empty() {
            return Err("Title is required".to_string());
        }
        if title.chars().count() > TITLE_MAX_LEN {
            return Err(format!("Title must be at most {} characters", TITLE_MAX_LEN));
        }
        if content.trim().is_empty() {
            return Err("Content is required".to_string());
        }

        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_title_keeps_content() {
        let p = NewPost::validated("  Hello ", "World\n").unwrap();
        assert_eq!(p.title, "Hello");
        assert_eq!(p.content, "World\n");
    }

    #[test]
    fn rejects_blank_fields() {
        assert!(NewPost::validated("", "body").is_err());
        assert!(NewPost::validated("title", "   ").is_err());
    }

    #[test]
    fn title_limit_counts_chars() {
        assert!(NewPost::validated(&"é".repeat(100), "body").is_ok());
        assert!(NewPost::validated(&"a".repeat(101), "body").is_err());
    }
}
