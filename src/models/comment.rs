use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_AUTHOR: &str = "Anonymous";
pub const AUTHOR_MAX_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author: String,
    pub content: String,
    pub date_posted: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub post_id: i64,
    pub author: String,
    pub content: String,
}

impl NewComment {
    /// Blank or missing author falls back to "Anonymous".
    pub fn validated(post_id: i64, author: Option<&str>, content: &str) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Err("Comment cannot be empty".to_string());
        }

        let author = match author.map(str::trim) {
            Some(a) if !a.is_empty() => a,
            _ => DEFAULT_AUTHOR,
        };
        if author.chars().count() > AUTHOR_MAX_LEN {
            return Err(format!("Author must be at most {} characters", AUTHOR_MAX_LEN));
        }

        Ok(Self {
            post_id,
            author: author.to_string(),
            content: content.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_defaults_to_anonymous() {
        assert_eq!(NewComment::validated(1, None, "hi").unwrap().author, "Anonymous");
        assert_eq!(NewComment::validated(1, Some("  "), "hi").unwrap().author, "Anonymous");
        assert_eq!(NewComment::validated(1, Some(" ann "), "hi").unwrap().author, "ann");
    }

    #[test]
    fn rejects_empty_content_and_long_author() {
        assert!(NewComment::validated(1, None, " \n").is_err());
        assert!(NewComment::validated(1, Some(&"a".repeat(51)), "hi").is_err());
    }
}
