use serde::{Deserialize, Serialize};

use crate::models::comment::Comment;
use crate::models::post::Post;

/// Form body of `POST /post/{id}`. `author` may be left out.
#[derive(Debug, Deserialize, Serialize)]
pub struct CommentForm {
    pub author: Option<String>,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct PostDetailOut {
    pub post: Post,
    pub comments: Vec<Comment>,
}
